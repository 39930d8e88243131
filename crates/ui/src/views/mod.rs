mod flow;
mod state;
mod status;

pub use flow::{FlowIntent, FlowScreen, LearnView, use_flow_dispatcher};
pub use state::{view_state_from_resource, ViewError, ViewState};
pub use status::StatusView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
