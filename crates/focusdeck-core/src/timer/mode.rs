use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    pub fn opposite(self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::Break => "break",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Mode::Work),
            "break" => Ok(Mode::Break),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Session lengths, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work_secs: u64,
    pub break_secs: u64,
    /// Delay between a session completing and the automatic mode switch.
    pub auto_switch_delay_secs: u64,
}

impl Durations {
    /// Full length of a session in `mode`. Never zero.
    pub fn total_secs(&self, mode: Mode) -> u64 {
        let secs = match mode {
            Mode::Work => self.work_secs,
            Mode::Break => self.break_secs,
        };
        secs.max(1)
    }

    /// Ticks between completion and the automatic switch. The switch is
    /// observed on a later tick than the completion, so this is at least one.
    pub fn switch_delay_secs(&self) -> u64 {
        self.auto_switch_delay_secs.max(1)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            break_secs: 5 * 60,
            auto_switch_delay_secs: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips() {
        assert_eq!(Mode::Work.opposite(), Mode::Break);
        assert_eq!(Mode::Break.opposite(), Mode::Work);
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("work".parse::<Mode>(), Ok(Mode::Work));
        assert_eq!("break".parse::<Mode>(), Ok(Mode::Break));
        assert!("lunch".parse::<Mode>().is_err());
    }

    #[test]
    fn zero_duration_is_clamped() {
        let d = Durations {
            work_secs: 0,
            ..Durations::default()
        };
        assert_eq!(d.total_secs(Mode::Work), 1);
        assert_eq!(d.total_secs(Mode::Break), 300);
    }
}
