mod loading_vm;
mod markdown_vm;
mod media_vm;
mod quiz_vm;
mod slide_vm;

pub use loading_vm::{
    LOADING_STEPS, LOADING_TICK, LoadingStep, LoadingStepVm, LoadingVm, StepStatus, active_step,
    map_loading,
};
pub use markdown_vm::{explanation_html, markdown_to_html, sanitize_html};
pub use media_vm::{ImageState, SlideMedia};
pub use quiz_vm::{
    LevelBadgeVm, OptionVm, QuestionVm, ResultRowVm, ResultVm, level_badges, level_class,
    level_icon, map_question, map_result,
};
pub use slide_vm::{SlideDotVm, SlideVm, map_slide, media_src};
