use std::collections::HashMap;

use crate::catalog::Movie;

/// Counts how many catalog entries credit each director.
pub fn collect(movies: &[Movie]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for movie in movies {
        let Some(director) = &movie.director else {
            continue;
        };
        *counts.entry(director.clone()).or_default() += 1;
    }

    counts
}

pub fn format(counts: HashMap<String, usize>, show_count: bool) -> Vec<String> {
    let mut items: Vec<(String, usize)> = counts.into_iter().collect();

    if show_count {
        items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        items
            .into_iter()
            .map(|(name, count)| format!("{}: {}", name, count))
            .collect()
    } else {
        items.sort_by(|a, b| a.0.cmp(&b.0));
        items.into_iter().map(|(name, _)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MpaaRating;

    fn movie(id: u64, director: Option<&str>) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            director: director.map(str::to_string),
            genre: "Drama".to_string(),
            mpaa_rating: MpaaRating::Pg,
            score: 7.0,
            release_date: None,
        }
    }

    #[test]
    fn test_collect_counts_credits() {
        let movies = vec![
            movie(1, Some("Brad Bird")),
            movie(2, Some("Ridley Scott")),
            movie(3, Some("Brad Bird")),
            movie(4, None),
        ];
        let counts = collect(&movies);
        assert_eq!(counts.get("Brad Bird"), Some(&2));
        assert_eq!(counts.get("Ridley Scott"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_format_sorted_by_name() {
        let movies = vec![movie(1, Some("Bong Joon-ho")), movie(2, Some("Agnes Varda"))];
        let lines = format(collect(&movies), false);
        assert_eq!(lines, ["Agnes Varda", "Bong Joon-ho"]);
    }

    #[test]
    fn test_format_with_counts_sorted_by_count() {
        let movies = vec![
            movie(1, Some("Brad Bird")),
            movie(2, Some("Brad Bird")),
            movie(3, Some("Agnes Varda")),
        ];
        let lines = format(collect(&movies), true);
        assert_eq!(lines, ["Brad Bird: 2", "Agnes Varda: 1"]);
    }
}
