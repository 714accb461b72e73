use crate::model::Track;

/// Read-only projection of the queue restricted to items matching
/// `query`, each paired with its index in the unfiltered queue. Callers
/// display the filtered rows but mutate by the original index, so the
/// pairing must survive until the next mutation.
///
/// Matching is a case-insensitive substring test against title, artist,
/// and album; absent fields simply contribute nothing. A blank query
/// selects everything.
pub fn filter_queue<'a>(items: &'a [Track], query: &str) -> Vec<(usize, &'a Track)> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, track)| needle.is_empty() || search_text(track).contains(&needle))
        .collect()
}

fn search_text(track: &Track) -> String {
    let mut text = String::new();
    for field in [&track.title, &track.artist, &track.album] {
        if let Some(value) = field {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&value.to_lowercase());
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(id: &str, title: Option<&str>, artist: Option<&str>, album: Option<&str>) -> Track {
        Track {
            id: id.to_string(),
            path: PathBuf::from(format!("{id}.mp3")),
            title: title.map(str::to_string),
            artist: artist.map(str::to_string),
            album: album.map(str::to_string),
            duration_seconds: 0.0,
            play_count: 0,
            rating: 0,
            date_added: 0,
        }
    }

    fn sample_queue() -> Vec<Track> {
        vec![
            track("1", Some("Blue Monday"), Some("New Order"), None),
            track("2", Some("Blue in Green"), Some("Miles Davis"), Some("Kind of Blue")),
            track("3", None, None, None),
            track("4", Some("Monday Mood"), None, Some("Lazy Days")),
        ]
    }

    #[test]
    fn empty_query_returns_everything_with_original_indices() {
        let queue = sample_queue();
        let matches = filter_queue(&queue, "");
        let indices: Vec<usize> = matches.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn whitespace_query_is_treated_as_empty() {
        let queue = sample_queue();
        assert_eq!(filter_queue(&queue, "   ").len(), queue.len());
    }

    #[test]
    fn match_is_case_insensitive() {
        let queue = sample_queue();
        let matches = filter_queue(&queue, "MONDAY");
        let ids: Vec<&str> = matches.iter().map(|(_, t)| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn artist_and_album_fields_are_searched() {
        let queue = sample_queue();
        assert_eq!(filter_queue(&queue, "miles").len(), 1);
        assert_eq!(filter_queue(&queue, "lazy").len(), 1);
    }

    #[test]
    fn tracks_without_metadata_never_match_a_real_query() {
        let queue = sample_queue();
        let matches = filter_queue(&queue, "blue");
        assert!(matches.iter().all(|(_, t)| t.id != "3"));
    }

    #[test]
    fn indices_target_the_unfiltered_queue() {
        let queue = sample_queue();
        let matches = filter_queue(&queue, "mood");
        assert_eq!(matches.len(), 1);
        let (original_index, matched) = matches[0];
        assert_eq!(original_index, 3);
        assert_eq!(queue[original_index].id, matched.id);
    }
}
