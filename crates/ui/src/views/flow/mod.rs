mod actions;
mod input;
mod loading;
mod mastery;
mod presentation;
mod quiz;
mod view;

pub use actions::{FlowIntent, use_flow_dispatcher};
pub use view::{FlowScreen, LearnView};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod flow_smoke;
