use std::time::Duration;

/// One line of the generation progress list, shown from `starts_at` on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadingStep {
    pub icon: &'static str,
    pub text: &'static str,
    pub starts_at: Duration,
}

pub const LOADING_STEPS: [LoadingStep; 5] = [
    LoadingStep {
        icon: "🔍",
        text: "Analyzing medical topic...",
        starts_at: Duration::from_secs(0),
    },
    LoadingStep {
        icon: "📚",
        text: "Generating educational content...",
        starts_at: Duration::from_secs(3),
    },
    LoadingStep {
        icon: "🎨",
        text: "Creating visual diagrams...",
        starts_at: Duration::from_secs(8),
    },
    LoadingStep {
        icon: "🔊",
        text: "Generating audio narration...",
        starts_at: Duration::from_secs(15),
    },
    LoadingStep {
        icon: "📝",
        text: "Preparing quiz questions...",
        starts_at: Duration::from_secs(25),
    },
];

/// Interval of the loading screen clock.
pub const LOADING_TICK: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Active,
    Pending,
}

impl StepStatus {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            StepStatus::Done => "loading-step loading-step--done",
            StepStatus::Active => "loading-step loading-step--active",
            StepStatus::Pending => "loading-step loading-step--pending",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadingStepVm {
    pub icon: &'static str,
    pub text: &'static str,
    pub status: StepStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadingVm {
    pub title: String,
    pub active_icon: &'static str,
    pub steps: Vec<LoadingStepVm>,
    pub progress_percent: u32,
    pub step_label: String,
}

/// Index of the step shown as in progress. The steps are cosmetic and do not
/// track the real request; the last one stays active until the lesson arrives.
#[must_use]
pub fn active_step(elapsed: Duration) -> usize {
    LOADING_STEPS
        .iter()
        .rposition(|step| step.starts_at <= elapsed)
        .unwrap_or(0)
}

/// Zero to three trailing dots, one more per tick.
#[must_use]
pub fn animated_dots(ticks: u64) -> &'static str {
    match ticks % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

#[must_use]
pub fn map_loading(ticks: u64) -> LoadingVm {
    let elapsed = LOADING_TICK * u32::try_from(ticks).unwrap_or(u32::MAX);
    let active = active_step(elapsed);
    let total = LOADING_STEPS.len();
    let steps = LOADING_STEPS
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let status = match index.cmp(&active) {
                std::cmp::Ordering::Less => StepStatus::Done,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            };
            LoadingStepVm {
                icon: if status == StepStatus::Done { "✅" } else { step.icon },
                text: step.text,
                status,
            }
        })
        .collect();

    LoadingVm {
        title: format!("Generating Your Lesson{}", animated_dots(ticks)),
        active_icon: LOADING_STEPS[active].icon,
        steps,
        progress_percent: u32::try_from((active + 1) * 100 / total).unwrap_or(100),
        step_label: format!("Step {} of {total}", active + 1),
    }
}
