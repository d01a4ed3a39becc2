//! Service layer
//!
//! Services contain the orchestration logic. Each one drives the
//! infrastructure or workflow capability it is given; the [`Orchestrator`]
//! composes them into the full deploy flow.
//!
//! Services take capability handles as trait objects so they can be
//! exercised against in-memory fakes.

mod deploy;
mod handler;
mod outputs;
mod wait;
mod workflow;

pub use deploy::deploy_stack;
pub use handler::Orchestrator;
pub use outputs::{
    REQUIRED_INFRA_OUTPUTS, STATE_MACHINE_OUTPUT_KEYS, extract_outputs, extract_required_outputs,
    find_state_machine_arn, merge_outputs, validate_outputs,
};
pub use wait::{WaitPolicy, wait_for_stack};
pub use workflow::start_workflow;
