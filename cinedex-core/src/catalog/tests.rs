use chrono::NaiveDate;

use super::CatalogService;
use crate::CatalogError;
use crate::database::infrastructure::memory::InMemoryCatalog;
use cinedex_model::{GenreID, Movie, MovieGenreID, MovieID};

fn inception() -> Movie {
    Movie {
        id: MovieID(5),
        title: "Inception".into(),
        description: "A thief who steals corporate secrets".into(),
        year: 2010,
        release_date: NaiveDate::from_ymd_opt(2010, 7, 16).unwrap(),
        rating: 8.8,
        runtime: 148,
        mpaa_rating: "PG-13".into(),
        ..Movie::default()
    }
}

fn seeded() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_genre(1, "Sci-Fi")
        .with_genre(2, "Thriller")
        .with_genre(3, "Drama")
        .with_genre(9, "Documentary")
        .with_movie(inception())
        .with_movie_titled(6, "Heat")
        .with_movie_titled(7, "Arrival")
        .link(11, 5, 1)
        .link(12, 5, 2)
        .link(13, 6, 2)
        .link(14, 7, 1)
        .link(15, 7, 3)
}

fn service(catalog: InMemoryCatalog) -> CatalogService {
    CatalogService::new(&catalog.into_unit_of_work())
}

#[tokio::test]
async fn movie_by_id_carries_every_association() {
    let catalog = service(seeded());

    let movie = catalog.get_movie_by_id(MovieID(5)).await.unwrap();

    assert_eq!(movie.title, "Inception");
    assert_eq!(movie.runtime, 148);
    assert_eq!(movie.genres.len(), 2);
    assert_eq!(movie.genres[&MovieGenreID(11)], "Sci-Fi");
    assert_eq!(movie.genres[&MovieGenreID(12)], "Thriller");
}

#[tokio::test]
async fn missing_movie_is_not_found_rather_than_timeout() {
    let catalog = service(seeded());

    let err = catalog.get_movie_by_id(MovieID(9999)).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn movie_without_associations_has_empty_genres() {
    let catalog =
        service(InMemoryCatalog::new().with_movie_titled(1, "Solaris"));

    let movie = catalog.get_movie_by_id(MovieID(1)).await.unwrap();
    assert!(movie.genres.is_empty());
}

#[tokio::test]
async fn dangling_association_keeps_its_key_with_empty_name() {
    let catalog = service(seeded().link(16, 6, 404));

    let movie = catalog.get_movie_by_id(MovieID(6)).await.unwrap();

    assert_eq!(movie.genres.len(), 2);
    assert_eq!(movie.genres[&MovieGenreID(13)], "Thriller");
    assert_eq!(movie.genres[&MovieGenreID(16)], "");
}

#[tokio::test]
async fn all_movies_are_listed_in_id_order_with_genres() {
    let catalog = service(seeded());

    let movies = catalog.get_all_movies(None).await.unwrap();

    let ids: Vec<_> = movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![MovieID(5), MovieID(6), MovieID(7)]);
    assert_eq!(
        movies[2].genre_names().collect::<Vec<_>>(),
        vec!["Sci-Fi", "Drama"]
    );
}

#[tokio::test]
async fn genre_filter_returns_exactly_the_linked_subset() {
    let catalog = service(seeded());

    let all = catalog.get_all_movies(None).await.unwrap();
    let sci_fi = catalog.get_all_movies(Some(GenreID(1))).await.unwrap();

    let ids: Vec<_> = sci_fi.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![MovieID(5), MovieID(7)]);
    assert!(sci_fi.iter().all(|m| all.contains(m)));
    assert!(sci_fi.iter().all(|m| m.genre_names().any(|g| g == "Sci-Fi")));
}

#[tokio::test]
async fn genre_filter_without_matches_is_empty_not_an_error() {
    let catalog = service(seeded());

    let movies = catalog.get_all_movies(Some(GenreID(9))).await.unwrap();
    assert!(movies.is_empty());

    let unknown = catalog.get_all_movies(Some(GenreID(77))).await.unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn resolver_failure_fails_the_whole_listing() {
    let catalog = service(seeded().failing_genre_lookup_for(6));

    let err = catalog.get_all_movies(None).await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Timeout {
            operation: "resolve_genres_for_movie",
            ..
        }
    ));
}

#[tokio::test]
async fn genres_are_listed_by_name() {
    let catalog = service(seeded());

    let genres = catalog.get_all_genres().await.unwrap();

    let names: Vec<_> = genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Documentary", "Drama", "Sci-Fi", "Thriller"]);
}

#[tokio::test]
async fn empty_genre_table_lists_nothing() {
    let catalog = service(InMemoryCatalog::new());
    assert!(catalog.get_all_genres().await.unwrap().is_empty());
}

#[tokio::test]
async fn genre_by_id_and_missing_genre() {
    let catalog = service(seeded());

    let genre = catalog.get_genre_by_id(GenreID(2)).await.unwrap();
    assert_eq!(genre.name, "Thriller");

    let err = catalog.get_genre_by_id(GenreID(404)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn movies_by_genre_with_no_movies_returns_genre_and_empty_list() {
    let catalog = service(seeded());

    let result = catalog.movies_by_genre(GenreID(9)).await.unwrap();

    assert_eq!(result.genre.id, GenreID(9));
    assert_eq!(result.genre.name, "Documentary");
    assert!(result.movies.is_empty());
}

#[tokio::test]
async fn movies_by_genre_lists_linked_movies() {
    let catalog = service(seeded());

    let result = catalog.movies_by_genre(GenreID(2)).await.unwrap();

    assert_eq!(result.genre.name, "Thriller");
    let titles: Vec<_> =
        result.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Inception", "Heat"]);
}

#[tokio::test]
async fn movies_by_missing_genre_is_not_found() {
    let catalog = service(seeded());

    let err = catalog.movies_by_genre(GenreID(404)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn repeated_reads_are_structurally_equal() {
    let catalog = service(seeded());

    let first = catalog.get_all_movies(None).await.unwrap();
    let second = catalog.get_all_movies(None).await.unwrap();
    assert_eq!(first, second);

    let genres_a = catalog.get_all_genres().await.unwrap();
    let genres_b = catalog.get_all_genres().await.unwrap();
    assert_eq!(genres_a, genres_b);
}
