//! Frame Model
//!
//! A frame carries one entry per channel in `data`: either a single sample
//! or a chunk of consecutive samples. Any other fields (timestamps, device
//! info, markers) ride along untouched.
//!
//! ```json
//! { "data": [0.1, -0.2, 0.3, 0.0], "timestamp": 1700000000 }
//! { "data": [[0.1, 0.2], [0.0, 0.1], [0.3, 0.2], [0.0, 0.0]], "info": {} }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Data of one channel within a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelData {
    Sample(f64),
    Chunk(Vec<f64>),
}

/// Whether a frame carries single samples or chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameShape {
    Sample,
    Chunk,
}

impl ChannelData {
    pub fn shape(&self) -> FrameShape {
        match self {
            ChannelData::Sample(_) => FrameShape::Sample,
            ChannelData::Chunk(_) => FrameShape::Chunk,
        }
    }

    /// Number of samples carried
    pub fn len(&self) -> usize {
        match self {
            ChannelData::Sample(_) => 1,
            ChannelData::Chunk(chunk) => chunk.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for ChannelData {
    fn from(sample: f64) -> Self {
        ChannelData::Sample(sample)
    }
}

impl From<Vec<f64>> for ChannelData {
    fn from(chunk: Vec<f64>) -> Self {
        ChannelData::Chunk(chunk)
    }
}

/// One unit of a multichannel stream
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub data: Vec<ChannelData>,

    /// Every other field, passed through unchanged
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Frame {
    pub fn new(data: Vec<ChannelData>) -> Self {
        Self {
            data,
            fields: Map::new(),
        }
    }

    /// One sample per channel
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self::new(samples.into_iter().map(ChannelData::Sample).collect())
    }

    /// One chunk per channel
    pub fn from_chunks(chunks: Vec<Vec<f64>>) -> Self {
        Self::new(chunks.into_iter().map(ChannelData::Chunk).collect())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn nb_channels(&self) -> usize {
        self.data.len()
    }

    /// Shape of the first channel, which decides how the frame is processed
    pub fn shape(&self) -> Option<FrameShape> {
        self.data.first().map(ChannelData::shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_frame_json() {
        let frame: Frame =
            serde_json::from_str(r#"{ "data": [1.0, -2.5, 3], "timestamp": 42 }"#).unwrap();

        assert_eq!(frame.shape(), Some(FrameShape::Sample));
        assert_eq!(frame.nb_channels(), 3);
        assert_eq!(frame.data[2], ChannelData::Sample(3.0));
        assert_eq!(frame.fields.get("timestamp"), Some(&Value::from(42)));
    }

    #[test]
    fn test_chunk_frame_json() {
        let frame: Frame = serde_json::from_str(
            r#"{ "data": [[1.0, 2.0], [3.0, 4.0]], "info": { "device": "muse" } }"#,
        )
        .unwrap();

        assert_eq!(frame.shape(), Some(FrameShape::Chunk));
        assert_eq!(frame.data[1], ChannelData::Chunk(vec![3.0, 4.0]));
        assert_eq!(frame.fields["info"]["device"], "muse");
    }

    #[test]
    fn test_frame_serialization_keeps_fields() {
        let frame = Frame::from_samples(vec![0.5, 0.25])
            .with_field("timestamp", 1_700_000_000_u64)
            .with_field("marker", "blink");
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["data"], serde_json::json!([0.5, 0.25]));
        assert_eq!(json["marker"], "blink");

        let back: Frame = serde_json::from_value(json).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_channel_data_len() {
        assert_eq!(ChannelData::from(1.0).len(), 1);
        assert_eq!(ChannelData::from(vec![1.0, 2.0, 3.0]).len(), 3);
        assert!(ChannelData::Chunk(Vec::new()).is_empty());
    }

    #[test]
    fn test_empty_frame_has_no_shape() {
        assert_eq!(Frame::default().shape(), None);
    }
}
