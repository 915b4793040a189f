//! User command inventory
//!
//! The two user-invocable actions, their default gestures, and the help text
//! shown in input help mode. Executing them needs the config store, so the
//! handlers live in `ifspeak-engine`.

/// Script category the commands are listed under
pub const SCRIPT_CATEGORY: &str = "ifInterpreters";

/// User-invocable commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Lower the stabilization delay by one step
    DecreaseDelay,
    /// Raise the stabilization delay by one step
    IncreaseDelay,
}

impl Command {
    /// Every command, in gesture-table order
    pub fn all() -> [Command; 2] {
        [Command::DecreaseDelay, Command::IncreaseDelay]
    }

    /// Stable script name
    pub fn name(self) -> &'static str {
        match self {
            Command::DecreaseDelay => "decrease_delay",
            Command::IncreaseDelay => "increase_delay",
        }
    }

    /// Default input gesture
    pub fn gesture(self) -> &'static str {
        match self {
            Command::DecreaseDelay => "kb:windows+NVDA+leftArrow",
            Command::IncreaseDelay => "kb:windows+NVDA+rightArrow",
        }
    }

    /// Input help category the command is listed under
    pub fn category(self) -> &'static str {
        SCRIPT_CATEGORY
    }

    /// Text presented in input help mode
    pub fn help(self) -> &'static str {
        match self {
            Command::DecreaseDelay => "Decrease the Stabilize Delay for the game output.",
            Command::IncreaseDelay => "Increase the Stabilize Delay for the game output.",
        }
    }

    /// Resolve a gesture; matching ignores ASCII case like the host does
    pub fn from_gesture(gesture: &str) -> Option<Command> {
        Command::all()
            .into_iter()
            .find(|c| c.gesture().eq_ignore_ascii_case(gesture))
    }

    /// Resolve a script name
    pub fn from_name(name: &str) -> Option<Command> {
        Command::all().into_iter().find(|c| c.name() == name)
    }

    /// The delay after applying this command to `delay`
    pub fn step(self, delay: f64) -> f64 {
        match self {
            Command::DecreaseDelay => crate::delay::decrease(delay),
            Command::IncreaseDelay => crate::delay::increase(delay),
        }
    }
}
