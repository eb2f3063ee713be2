/// Sub-steps of one animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStep {
    /// Sample clips into node poses and rebuild world matrices.
    Mixer,
    /// Camera yaw, model spin, light color, light orbit and shader time.
    Animation,
    Glitch,
    Render,
}

impl FrameStep {
    pub fn name(self) -> &'static str {
        match self {
            FrameStep::Mixer => "mixer",
            FrameStep::Animation => "animation",
            FrameStep::Glitch => "glitch",
            FrameStep::Render => "render",
        }
    }
}

/// Execution order within a frame.
pub const FRAME_STEPS: [FrameStep; 4] = [
    FrameStep::Mixer,
    FrameStep::Animation,
    FrameStep::Glitch,
    FrameStep::Render,
];

/// Run every step in [`FRAME_STEPS`] order. A failing step is logged and
/// skipped; later steps still run. Returns the number of failed steps.
pub fn run_frame_steps<E: std::fmt::Debug>(
    mut step: impl FnMut(FrameStep) -> Result<(), E>,
) -> usize {
    let mut failed = 0;
    for s in FRAME_STEPS {
        if let Err(e) = step(s) {
            log::warn!("[frame] {} step failed: {:?}", s.name(), e);
            failed += 1;
        }
    }
    failed
}
