//! ECS resources made available to systems.
//!
//! Overview
//! - `agentindex` – scene id to entity lookup for the current snapshot
//! - `failures` – metric failures recorded by the failure observer
//! - `metricsconfig` – emission parameters and coverage policy, loaded from INI
//! - `worldtime` – step and time of the current snapshot
pub mod agentindex;
pub mod failures;
pub mod metricsconfig;
pub mod worldtime;
