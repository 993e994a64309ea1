//! Fixed rendering, speech, and naming parameters.

/// Parameters for the cloud speech-synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    /// Audio container requested from the service.
    pub output_format: String,
    /// Voice identity used for every segment.
    pub voice_id: String,
    /// Synthesis engine tier.
    pub engine: String,
    /// Speaking rate as a percentage of normal speed.
    pub rate_percent: u32,
    /// Pause appended after each segment, in milliseconds.
    pub trailing_pause_ms: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            output_format: "mp3".to_string(),
            voice_id: "Matthew".to_string(),
            engine: "neural".to_string(),
            rate_percent: 80,
            trailing_pause_ms: 731,
        }
    }
}

/// Parameters for the title-card video and the final encode.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub background_color: String,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Fraction of each frame axis kept free on either side of the text.
    pub text_border: f64,
    pub font_size: u32,
    pub font_color: String,
    pub line_spacing: u32,
    pub video_codec: String,
    pub audio_codec: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: "black".to_string(),
            frame_width: 1920,
            frame_height: 1080,
            text_border: 0.1,
            font_size: 50,
            font_color: "white".to_string(),
            line_spacing: 50,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
        }
    }
}

/// File naming conventions shared by every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub text_extension: String,
    pub audio_extension: String,
    pub clip_prefix: String,
    pub title_card_prefix: String,
    pub manifest_name: String,
    pub output_name: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            text_extension: "txt".to_string(),
            audio_extension: "mp3".to_string(),
            clip_prefix: "merged_".to_string(),
            title_card_prefix: "temp_video_".to_string(),
            manifest_name: "videos_to_concat.txt".to_string(),
            output_name: "final_video.mp4".to_string(),
        }
    }
}

/// Complete run configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub speech: SpeechConfig,
    pub render: RenderConfig,
    pub layout: LayoutConfig,
    /// External programs that must resolve on `PATH` before a run.
    pub required_tools: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech: SpeechConfig::default(),
            render: RenderConfig::default(),
            layout: LayoutConfig::default(),
            required_tools: ["aws", "ffmpeg", "ffprobe"]
                .iter()
                .map(|tool| tool.to_string())
                .collect(),
        }
    }
}
