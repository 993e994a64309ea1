//! Splitting the input text into numbered segment files.

mod splitter;

pub use splitter::{
    Segment, SegmentError, Segmenter, discover_segments, segment_file_name, segment_pattern,
    sort_by_file_name, split_paragraphs,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn segment(name: &str, index: usize) -> Segment {
        Segment {
            index,
            text_path: PathBuf::from("/work").join(name),
        }
    }

    // ===========================================
    // split_paragraphs tests
    // ===========================================

    #[test]
    fn test_split_two_paragraphs() {
        let parts = split_paragraphs("Hello world.\n\nGoodbye world.\n");
        assert_eq!(parts, vec!["Hello world.", "Goodbye world."]);
    }

    #[test]
    fn test_split_keeps_single_newlines_inside_paragraph() {
        let parts = split_paragraphs("line one\nline two\n\nnext");
        assert_eq!(parts, vec!["line one\nline two", "next"]);
    }

    #[test]
    fn test_split_no_part_contains_blank_line() {
        let text = "a\n\nb\n\nc\n\nd\n";
        let parts = split_paragraphs(text);

        assert_eq!(parts.len(), 4);
        assert!(parts.iter().all(|p| !p.contains("\n\n")));
    }

    #[test]
    fn test_split_normalizes_crlf() {
        let parts = split_paragraphs("first\r\n\r\nsecond\r\n");
        assert_eq!(parts, vec!["first", "second"]);
    }

    #[test]
    fn test_split_drops_empty_pieces() {
        let parts = split_paragraphs("\n\nonly\n\n\n\n");
        assert_eq!(parts, vec!["only"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_paragraphs("").is_empty());
    }

    // ===========================================
    // Naming tests
    // ===========================================

    #[test]
    fn test_segment_file_name_zero_padded() {
        assert_eq!(segment_file_name("story", 1, "txt"), "story_0001.txt");
        assert_eq!(segment_file_name("story", 42, "txt"), "story_0042.txt");
        assert_eq!(segment_file_name("story", 12345, "txt"), "story_12345.txt");
    }

    #[test]
    fn test_segment_pattern_matches_only_segments() {
        let pattern = segment_pattern("my.story", "txt");

        assert!(pattern.is_match("my.story_0001.txt"));
        assert!(pattern.is_match("my.story_10000.txt"));
        assert!(!pattern.is_match("my.story.txt"));
        assert!(!pattern.is_match("myXstory_0001.txt"));
        assert!(!pattern.is_match("my.story_001.txt"));
        assert!(!pattern.is_match("my.story_0001.mp3"));
    }

    #[test]
    fn test_is_segment_name_follows_layout_extension() {
        let layout = LayoutConfig::default();
        assert!(Segment::is_segment_name("story", "story_0001.txt", &layout));
        assert!(!Segment::is_segment_name("story", "story_0001.mp3", &layout));
        assert!(!Segment::is_segment_name("story", "story.txt", &layout));

        let markdown = LayoutConfig {
            text_extension: "md".to_string(),
            ..LayoutConfig::default()
        };
        assert!(Segment::is_segment_name("story", "story_0001.md", &markdown));
        assert!(!Segment::is_segment_name("story", "story_0001.txt", &markdown));
    }

    #[test]
    fn test_segment_derived_paths() {
        let layout = LayoutConfig::default();
        let seg = segment("story_0001.txt", 1);

        assert_eq!(seg.file_name(), "story_0001.txt");
        assert_eq!(seg.audio_path(&layout), PathBuf::from("/work/story_0001.mp3"));
        assert_eq!(
            seg.title_card_path(&layout),
            PathBuf::from("/work/temp_video_story_0001.txt.mp4")
        );
        assert_eq!(
            seg.clip_path(&layout),
            PathBuf::from("/work/merged_story_0001.txt.mp4")
        );
    }

    // ===========================================
    // Segmenter tests
    // ===========================================

    #[test]
    fn test_segmenter_writes_numbered_files() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("story.txt");
        std::fs::write(&input, "Hello world.\n\nGoodbye world.\n").unwrap();

        let segments = Segmenter::new(LayoutConfig::default())
            .split_file(&input)
            .unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index, 1);
        assert_eq!(segments[0].file_name(), "story_0001.txt");
        assert_eq!(segments[1].file_name(), "story_0002.txt");

        let first = std::fs::read_to_string(temp_dir.path().join("story_0001.txt")).unwrap();
        let second = std::fs::read_to_string(temp_dir.path().join("story_0002.txt")).unwrap();
        assert_eq!(first, "Hello world.\n");
        assert_eq!(second, "Goodbye world.\n");

        // Input is untouched
        let original = std::fs::read_to_string(&input).unwrap();
        assert_eq!(original, "Hello world.\n\nGoodbye world.\n");
    }

    #[test]
    fn test_segmenter_n_paragraphs_in_document_order() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("long.txt");
        let paragraphs: Vec<String> = (1..=12).map(|i| format!("Paragraph {i}.")).collect();
        std::fs::write(&input, paragraphs.join("\n\n")).unwrap();

        let segments = Segmenter::new(LayoutConfig::default())
            .split_file(&input)
            .unwrap();

        assert_eq!(segments.len(), 12);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.index, i + 1);
            assert_eq!(seg.file_name(), format!("long_{:04}.txt", i + 1));
            let text = std::fs::read_to_string(&seg.text_path).unwrap();
            assert_eq!(text.trim_end(), paragraphs[i]);
            assert!(!text.contains("\n\n"));
        }
    }

    #[test]
    fn test_segmenter_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = Segmenter::new(LayoutConfig::default())
            .split_file(&temp_dir.path().join("missing.txt"));

        assert!(matches!(result, Err(SegmentError::Io(_))));
    }

    // ===========================================
    // Ordering tests
    // ===========================================

    #[test]
    fn test_discover_segments_finds_only_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        for name in [
            "story_0002.txt",
            "story_0001.txt",
            "story.txt",
            "other_0001.txt",
            "story_0003.mp3",
        ] {
            std::fs::write(temp_dir.path().join(name), "x").unwrap();
        }

        let mut found = discover_segments(temp_dir.path(), "story", &LayoutConfig::default())
            .unwrap();
        sort_by_file_name(&mut found);

        let names: Vec<String> = found.iter().map(Segment::file_name).collect();
        assert_eq!(names, vec!["story_0001.txt", "story_0002.txt"]);
        assert_eq!(found[1].index, 2);
    }

    #[test]
    fn test_file_name_order_diverges_from_document_order_past_9999() {
        // Document order from the segmenter
        let mut segments = vec![segment("s_9999.txt", 9999), segment("s_10000.txt", 10000)];

        sort_by_file_name(&mut segments);

        // The renderer's lexical walk visits 10000 before 9999
        assert_eq!(segments[0].index, 10000);
        assert_eq!(segments[1].index, 9999);
    }

    #[test]
    fn test_file_name_order_matches_document_order_below_10000() {
        let mut segments: Vec<Segment> = [3, 1, 2, 9999, 10]
            .iter()
            .map(|&i| segment(&segment_file_name("s", i, "txt"), i))
            .collect();

        sort_by_file_name(&mut segments);

        let order: Vec<usize> = segments.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 2, 3, 10, 9999]);
    }
}
