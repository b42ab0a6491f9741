use std::fmt;

/// Rational frames-per-second value, kept exact for the encoder command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    /// NTSC 29.97 fps, the rate every sequence is encoded at.
    pub const NTSC_2997: Fps = Fps {
        num: 30_000,
        den: 1_001,
    };
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
