//! Normalized views over raw TMDB payloads.
//!
//! Every constructor here is total: missing or mistyped fields come out as `None`
//! (and are left out of the serialized JSON) instead of failing.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum MediaType {
    Movie,
    #[serde(rename = "TVShow")]
    TvShow,
    Person,
    #[serde(rename = "unknown")]
    Unknown,
}

impl MediaType {
    pub fn from_tmdb_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("movie") => MediaType::Movie,
            Some("tv") => MediaType::TvShow,
            Some("person") => MediaType::Person,
            _ => MediaType::Unknown,
        }
    }
}

/// Fields shared by movies, shows and people.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

impl Media {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            id: int(raw, "id"),
            media_type: MediaType::from_tmdb_tag(raw.get("media_type").and_then(Value::as_str)),
            popularity: float(raw, "popularity"),
            overview: string(raw, "overview"),
            poster_path: string(raw, "poster_path"),
            backdrop_path: string(raw, "backdrop_path"),
        }
    }

    fn tagged(raw: &Value, media_type: MediaType) -> Self {
        Self { media_type, ..Self::from_raw(raw) }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(flatten)]
    pub media: Media,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<i64>,
}

impl Movie {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            media: Media::tagged(raw, MediaType::Movie),
            title: string(raw, "title"),
            original_title: string(raw, "original_title"),
            release_date: string(raw, "release_date"),
            genre_ids: genre_ids(raw),
            vote_average: float(raw, "vote_average"),
            vote_count: int(raw, "vote_count"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TvShow {
    #[serde(flatten)]
    pub media: Media,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<i64>,
}

impl TvShow {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            media: Media::tagged(raw, MediaType::TvShow),
            name: string(raw, "name"),
            original_name: string(raw, "original_name"),
            first_air_date: string(raw, "first_air_date"),
            genre_ids: genre_ids(raw),
            vote_average: float(raw, "vote_average"),
            vote_count: int(raw, "vote_count"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(flatten)]
    pub media: Media,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Credits are passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_for: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_for_department: Option<String>,
}

impl Person {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            media: Media::tagged(raw, MediaType::Person),
            name: string(raw, "name"),
            known_for: raw.get("known_for").and_then(Value::as_array).cloned(),
            gender: int(raw, "gender"),
            known_for_department: string(raw, "known_for_department"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Review {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    pub rating: f64,
}

impl Review {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            author: string(raw, "author"),
            content: string(raw, "content"),
            created: string(raw, "created_at"),
            updated: string(raw, "updated_at"),
            rating: raw
                .get("author_details")
                .and_then(|details| float(details, "rating"))
                .unwrap_or(0.0),
        }
    }
}

/// One entry of a mixed-type result list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Movie(Movie),
    TvShow(TvShow),
    Person(Person),
    /// Unrecognized kinds are kept as-is rather than dropped.
    Raw(Value),
}

impl SearchResult {
    pub fn from_raw(raw: &Value) -> Self {
        match raw.get("media_type").and_then(Value::as_str) {
            Some("movie") => SearchResult::Movie(Movie::from_raw(raw)),
            Some("tv") => SearchResult::TvShow(TvShow::from_raw(raw)),
            Some("person") => SearchResult::Person(Person::from_raw(raw)),
            _ => SearchResult::Raw(raw.clone()),
        }
    }
}

/// A TMDB list envelope with its `results` normalized.
///
/// All other top-level keys (`page`, `total_pages`, `dates`, ...) are kept verbatim.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl<T> Page<T> {
    pub fn from_raw(raw: Value, normalize: impl Fn(&Value) -> T) -> Self {
        let mut rest = match raw {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let results = match rest.remove("results") {
            Some(Value::Array(items)) => items.iter().map(normalize).collect(),
            _ => Vec::new(),
        };
        Self { results, rest }
    }
}

fn string(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

fn int(raw: &Value, key: &str) -> Option<i64> {
    raw.get(key).and_then(Value::as_i64)
}

fn float(raw: &Value, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

fn genre_ids(raw: &Value) -> Option<Vec<i64>> {
    if let Some(ids) = raw.get("genre_ids").and_then(Value::as_array) {
        return Some(ids.iter().filter_map(Value::as_i64).collect());
    }
    // detail payloads carry `genres: [{id, name}]` instead
    raw.get("genres")
        .and_then(Value::as_array)
        .map(|genres| genres.iter().filter_map(|g| int(g, "id")).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_movie_overrides_upstream_media_type() {
        // Arrange
        let raw = json!({ "id": 1, "media_type": "tv", "title": "Heat" });

        // Act
        let movie = Movie::from_raw(&raw);

        // Assert
        assert_eq!(movie.media.media_type, MediaType::Movie);
        assert_eq!(serde_json::to_value(&movie).unwrap()["mediaType"], "Movie");
    }

    #[test]
    fn test_tv_show_and_person_override_media_type() {
        let raw = json!({ "id": 7, "media_type": "movie" });

        let show = serde_json::to_value(TvShow::from_raw(&raw)).unwrap();
        let person = serde_json::to_value(Person::from_raw(&raw)).unwrap();

        assert_eq!(show["mediaType"], "TVShow");
        assert_eq!(person["mediaType"], "Person");
    }

    #[test]
    fn test_base_media_reads_upstream_tag() {
        assert_eq!(Media::from_raw(&json!({ "media_type": "tv" })).media_type, MediaType::TvShow);
        assert_eq!(Media::from_raw(&json!({ "media_type": "x" })).media_type, MediaType::Unknown);
        assert_eq!(
            serde_json::to_value(Media::from_raw(&json!({}))).unwrap()["mediaType"],
            "unknown"
        );
    }

    #[test]
    fn test_movie_field_mapping() {
        // Arrange
        let raw = json!({
            "id": 550,
            "title": "Fight Club",
            "original_title": "Fight Club",
            "release_date": "1999-10-15",
            "genre_ids": [18, 53],
            "vote_average": 8.4,
            "vote_count": 26280,
            "popularity": 61.4,
            "overview": "A ticking-time-bomb insomniac...",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": null
        });

        // Act
        let value = serde_json::to_value(Movie::from_raw(&raw)).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({
                "id": 550,
                "mediaType": "Movie",
                "popularity": 61.4,
                "overview": "A ticking-time-bomb insomniac...",
                "posterPath": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "backdropPath": null,
                "title": "Fight Club",
                "originalTitle": "Fight Club",
                "releaseDate": "1999-10-15",
                "genreIds": [18, 53],
                "voteAverage": 8.4,
                "voteCount": 26280
            })
        );
    }

    #[test]
    fn test_missing_fields_are_omitted_not_errors() {
        // Arrange
        let raw = json!({ "id": "not-a-number" });

        // Act
        let value = serde_json::to_value(TvShow::from_raw(&raw)).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({ "mediaType": "TVShow", "posterPath": null, "backdropPath": null })
        );
    }

    #[test]
    fn test_genre_ids_fall_back_to_detail_genres() {
        let raw = json!({
            "genres": [{ "id": 18, "name": "Drama" }, { "id": 80, "name": "Crime" }]
        });

        let movie = Movie::from_raw(&raw);

        assert_eq!(movie.genre_ids, Some(vec![18, 80]));
    }

    #[test]
    fn test_person_keeps_known_for_opaque() {
        // Arrange
        let credit = json!({ "id": 550, "media_type": "movie", "anything": [1, 2] });
        let raw = json!({
            "id": 287,
            "name": "Brad Pitt",
            "gender": 2,
            "known_for_department": "Acting",
            "known_for": [credit.clone()]
        });

        // Act
        let person = Person::from_raw(&raw);

        // Assert
        assert_eq!(person.name.as_deref(), Some("Brad Pitt"));
        assert_eq!(person.gender, Some(2));
        assert_eq!(person.known_for_department.as_deref(), Some("Acting"));
        assert_eq!(person.known_for, Some(vec![credit]));
    }

    #[test]
    fn test_review_rating_defaults_to_zero() {
        let without_details = json!({ "author": "a", "content": "c" });
        let without_rating = json!({ "author_details": { "username": "a" } });
        let null_rating = json!({ "author_details": { "rating": null } });

        for raw in [without_details, without_rating, null_rating] {
            assert_eq!(Review::from_raw(&raw).rating, 0.0);
        }
    }

    #[test]
    fn test_review_field_mapping() {
        // Arrange
        let raw = json!({
            "author": "Goddard",
            "author_details": { "rating": 7.0 },
            "content": "Pretty awesome movie.",
            "created_at": "2018-06-09T17:51:53.359Z",
            "updated_at": "2021-06-23T15:58:09.421Z"
        });

        // Act
        let review = Review::from_raw(&raw);

        // Assert
        assert_eq!(review.author.as_deref(), Some("Goddard"));
        assert_eq!(review.created.as_deref(), Some("2018-06-09T17:51:53.359Z"));
        assert_eq!(review.updated.as_deref(), Some("2021-06-23T15:58:09.421Z"));
        assert_eq!(review.rating, 7.0);
    }

    #[test]
    fn test_page_preserves_order_and_envelope() {
        // Arrange
        let raw = json!({
            "page": 1,
            "results": [{ "id": 3 }, { "id": 1 }, { "id": 3 }, { "id": 2 }],
            "total_pages": 10,
            "total_results": 200
        });

        // Act
        let page = Page::from_raw(raw, Movie::from_raw);

        // Assert
        let ids: Vec<_> = page.results.iter().map(|m| m.media.id).collect();
        assert_eq!(ids, vec![Some(3), Some(1), Some(3), Some(2)]);
        assert_eq!(page.rest.get("page"), Some(&json!(1)));
        assert_eq!(page.rest.get("total_results"), Some(&json!(200)));
        assert!(!page.rest.contains_key("results"));
    }

    #[test]
    fn test_page_without_results_is_empty() {
        let page = Page::from_raw(json!({ "page": 1 }), Review::from_raw);
        assert!(page.results.is_empty());

        let page = Page::from_raw(json!("garbage"), Review::from_raw);
        assert!(page.results.is_empty());
        assert!(page.rest.is_empty());
    }

    #[test]
    fn test_multi_search_dispatches_on_media_type() {
        // Arrange
        let unknown = json!({ "id": 4, "media_type": "x", "whatever": true });
        let raw = json!({
            "results": [
                { "id": 1, "media_type": "movie", "title": "Alien" },
                { "id": 2, "media_type": "tv", "name": "Lost" },
                { "id": 3, "media_type": "person", "name": "Sigourney Weaver" },
                unknown.clone()
            ]
        });

        // Act
        let page = Page::from_raw(raw, SearchResult::from_raw);

        // Assert
        assert_eq!(page.results.len(), 4);
        assert!(
            matches!(&page.results[0], SearchResult::Movie(m) if m.title.as_deref() == Some("Alien"))
        );
        assert!(
            matches!(&page.results[1], SearchResult::TvShow(t) if t.name.as_deref() == Some("Lost"))
        );
        assert!(matches!(&page.results[2], SearchResult::Person(_)));
        assert_eq!(page.results[3], SearchResult::Raw(unknown.clone()));

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["results"][0]["mediaType"], "Movie");
        assert_eq!(value["results"][1]["mediaType"], "TVShow");
        assert_eq!(value["results"][2]["mediaType"], "Person");
        assert_eq!(value["results"][3], unknown);
    }
}
