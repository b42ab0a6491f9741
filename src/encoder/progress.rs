/// Turns `ffmpeg -progress` output into completion ratios.
///
/// `ffmpeg` writes blocks of `key=value` lines terminated by `progress=continue` or
/// `progress=end`. The ratio is the last reported `frame=` over the number of staged frames.
#[derive(Clone, Debug)]
pub struct ProgressParser {
    expected_frames: u64,
    frame: u64,
    finished: bool,
}

impl ProgressParser {
    pub fn new(expected_frames: u64) -> Self {
        Self {
            expected_frames,
            frame: 0,
            finished: false,
        }
    }

    /// Feed one line; returns a ratio when the line closes a progress block.
    pub fn feed_line(&mut self, line: &str) -> Option<f64> {
        let (key, value) = line.trim().split_once('=')?;
        match key.trim() {
            "frame" => {
                if let Ok(n) = value.trim().parse::<u64>() {
                    self.frame = n;
                }
                None
            }
            "progress" => match value.trim() {
                "end" => {
                    self.finished = true;
                    Some(1.0)
                }
                _ => Some(self.ratio()),
            },
            _ => None,
        }
    }

    /// Current ratio in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.finished {
            return 1.0;
        }
        if self.expected_frames == 0 {
            return 0.0;
        }
        (self.frame as f64 / self.expected_frames as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encoder/progress.rs"]
mod tests;
