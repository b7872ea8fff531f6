use crate::common::*;

/// The camera mounting positions of the recording vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Camera {
    Center,
    Right,
    Left,
}

impl Camera {
    /// All cameras in recording order.
    pub const ALL: [Self; 3] = [Self::Center, Self::Right, Self::Left];

    /// The additive steering correction w.r.t. the mounting position.
    pub fn correction(&self) -> f64 {
        match self {
            Self::Center => 0.0,
            Self::Right => -0.02,
            Self::Left => 0.02,
        }
    }

    /// The file name prefix used by the recorder.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Right => "right",
            Self::Left => "left",
        }
    }

    /// Builds the image file name for a frame captured at the timestamp.
    pub fn image_file_name(&self, timestamp: &str) -> String {
        format!("{}-{}.jpg", self.file_stem(), timestamp)
    }
}
