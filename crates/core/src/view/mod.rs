//! View models for the page.
//!
//! Pure functions turning flow state into what a client displays. Nothing
//! here performs I/O.

use serde::{Deserialize, Serialize};

use crate::catalog::{poster_url, Movie};
use crate::search::{SearchState, TrendingState};
use crate::trend::TrendRecord;

/// Message shown when a search returns no movies.
pub const NOT_FOUND_MESSAGE: &str = "Searched movie title not found...";

/// Whether the movie list came from a keyword search or the popular listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Search,
    Discover,
}

impl SearchMode {
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            SearchMode::Discover
        } else {
            SearchMode::Search
        }
    }
}

/// One movie in the result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCard {
    pub id: u32,
    pub title: String,
    pub poster_url: Option<String>,
    /// Average vote rounded to one decimal, if rated.
    pub rating: Option<String>,
    pub year: Option<u32>,
    pub language: Option<String>,
}

impl MovieCard {
    pub fn from_movie(movie: &Movie, image_base_url: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|path| poster_url(image_base_url, path)),
            rating: movie
                .vote_average
                .filter(|v| *v > 0.0)
                .map(|v| format!("{:.1}", v)),
            year: movie.year(),
            language: movie.original_language.clone(),
        }
    }
}

/// Rendered "All Movies" section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchView {
    Idle,
    Loading,
    Error {
        message: String,
    },
    NotFound {
        message: String,
    },
    Cards {
        mode: SearchMode,
        query: String,
        movies: Vec<MovieCard>,
    },
}

/// One row of the trending list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position.
    pub rank: usize,
    pub search_term: String,
    pub count: u64,
    pub movie_id: u32,
    pub poster_url: Option<String>,
}

/// Rendered "Trending Movies" section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendingView {
    Loading,
    Unavailable { message: String },
    /// Loaded but nobody has searched anything yet; the section is hidden.
    NothingYet,
    Ranked { entries: Vec<RankedEntry> },
}

/// Both sections of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    pub search: SearchView,
    pub trending: TrendingView,
}

/// Render the search section.
pub fn render_search(state: &SearchState, image_base_url: &str) -> SearchView {
    match state {
        SearchState::Idle => SearchView::Idle,
        SearchState::Loading { .. } => SearchView::Loading,
        SearchState::Failed { message, .. } => SearchView::Error {
            message: message.clone(),
        },
        SearchState::Empty { .. } => SearchView::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
        },
        SearchState::Loaded { query, movies } => SearchView::Cards {
            mode: SearchMode::for_query(query),
            query: query.clone(),
            movies: movies
                .iter()
                .map(|m| MovieCard::from_movie(m, image_base_url))
                .collect(),
        },
    }
}

/// Render the trending section.
pub fn render_trending(state: &TrendingState) -> TrendingView {
    match state {
        // Trending starts loading immediately, so idle renders as loading.
        TrendingState::Idle | TrendingState::Loading => TrendingView::Loading,
        TrendingState::Failed { message } => TrendingView::Unavailable {
            message: message.clone(),
        },
        TrendingState::Loaded { records } if records.is_empty() => TrendingView::NothingYet,
        TrendingState::Loaded { records } => TrendingView::Ranked {
            entries: records.iter().enumerate().map(ranked_entry).collect(),
        },
    }
}

fn ranked_entry((index, record): (usize, &TrendRecord)) -> RankedEntry {
    RankedEntry {
        rank: index + 1,
        search_term: record.search_term.clone(),
        count: record.count,
        movie_id: record.movie_id,
        poster_url: record.poster_url.clone(),
    }
}

/// Render the whole page.
pub fn render_page(
    search: &SearchState,
    trending: &TrendingState,
    image_base_url: &str,
) -> PageView {
    PageView {
        search: render_search(search, image_base_url),
        trending: render_trending(trending),
    }
}
