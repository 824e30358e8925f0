use chrono::NaiveDate;
use storefront_core::catalog::{Catalog, query};
use storefront_core::types::{BookFormat, GenreFilter, Product, ProductId, QueryParams, SortKey};

fn book(
    id: &str,
    title: &str,
    author: &str,
    genre: &str,
    price: f64,
    discount: f64,
    rating: f64,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        author: author.to_string(),
        price,
        discount,
        genre: genre.to_string(),
        description: format!("A {} novel.", genre.to_lowercase()),
        cover_image: format!("/covers/{id}.jpg"),
        format: BookFormat::Epub,
        rating,
        pages: 320,
        language: "English".to_string(),
        release_date: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"),
    }
}

fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        book("bk-1", "Dune", "Frank Herbert", "Science Fiction", 10.0, 0.0, 4.8),
        book("bk-2", "The Hobbit", "J. R. R. Tolkien", "Fantasy", 20.0, 0.5, 4.7),
        book("bk-3", "Emma", "Jane Austen", "Classic", 8.0, 0.0, 4.2),
        book("bk-4", "Legacy", "Duncan Pryce", "Classic", 12.0, 0.25, 3.9),
    ])
    .expect("valid catalog")
}

fn titles(products: &[&Product]) -> Vec<String> {
    products.iter().map(|product| product.title.clone()).collect()
}

#[test]
fn search_matches_title_and_author_case_insensitively() {
    let catalog = sample_catalog();
    let params = QueryParams { search: "dun".to_string(), ..QueryParams::default() };

    let result = query(&catalog, &params);
    assert_eq!(titles(&result), vec!["Dune", "Legacy"]);

    let params = QueryParams { search: "DUNE".to_string(), ..QueryParams::default() };
    let result = query(&catalog, &params);
    assert_eq!(titles(&result), vec!["Dune"]);
}

#[test]
fn search_matches_description() {
    let catalog = sample_catalog();
    let params = QueryParams { search: "fantasy novel".to_string(), ..QueryParams::default() };

    let result = query(&catalog, &params);
    assert_eq!(titles(&result), vec!["The Hobbit"]);
}

#[test]
fn empty_search_matches_everything() {
    let catalog = sample_catalog();
    let result = query(&catalog, &QueryParams::default());
    assert_eq!(result.len(), catalog.len());
}

#[test]
fn genre_filter_is_exact_and_case_sensitive() {
    let catalog = sample_catalog();

    let params =
        QueryParams { genre: GenreFilter::Only("Classic".to_string()), ..QueryParams::default() };
    let result = query(&catalog, &params);
    assert_eq!(titles(&result), vec!["Emma", "Legacy"]);

    let params =
        QueryParams { genre: GenreFilter::Only("classic".to_string()), ..QueryParams::default() };
    assert!(query(&catalog, &params).is_empty());
}

#[test]
fn search_and_genre_predicates_combine() {
    let catalog = sample_catalog();
    let params = QueryParams {
        search: "dun".to_string(),
        genre: GenreFilter::Only("Classic".to_string()),
        ..QueryParams::default()
    };

    let result = query(&catalog, &params);
    assert_eq!(titles(&result), vec!["Legacy"]);
}

#[test]
fn price_sort_uses_discounted_price_and_is_stable() {
    let catalog = sample_catalog();
    let params = QueryParams { sort: SortKey::Price, ..QueryParams::default() };

    // Effective prices: Emma 8.00, Legacy 9.00, Dune 10.00, The Hobbit 10.00.
    // Dune and The Hobbit tie, so they keep their catalog order.
    let result = query(&catalog, &params);
    assert_eq!(titles(&result), vec!["Emma", "Legacy", "Dune", "The Hobbit"]);

    let effective: Vec<f64> = result.iter().map(|product| product.effective_price()).collect();
    assert!(effective.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn rating_sort_is_descending() {
    let catalog = sample_catalog();
    let params = QueryParams { sort: SortKey::Rating, ..QueryParams::default() };

    let result = query(&catalog, &params);
    let ratings: Vec<f64> = result.iter().map(|product| product.rating).collect();
    assert!(ratings.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(titles(&result)[0], "Dune");
}

#[test]
fn title_sort_ignores_case_and_orders_numerals_naturally() {
    let catalog = Catalog::new(vec![
        book("bk-1", "book 10", "A", "Classic", 1.0, 0.0, 1.0),
        book("bk-2", "Book 2", "B", "Classic", 1.0, 0.0, 1.0),
        book("bk-3", "atlas", "C", "Classic", 1.0, 0.0, 1.0),
    ])
    .expect("valid catalog");

    let result = query(&catalog, &QueryParams::default());
    assert_eq!(titles(&result), vec!["atlas", "Book 2", "book 10"]);
}

#[test]
fn query_is_a_pure_function_of_its_inputs() {
    let catalog = sample_catalog();
    let params = QueryParams {
        search: "a".to_string(),
        genre: GenreFilter::All,
        sort: SortKey::Price,
    };

    let first = query(&catalog, &params);
    let second = query(&catalog, &params);
    assert_eq!(first, second);

    // The catalog itself is untouched.
    assert_eq!(catalog.products()[0].title, "Dune");
}

#[test]
fn genre_list_is_distinct_sorted_and_all_prefixed() {
    let catalog = sample_catalog();
    assert_eq!(catalog.genres(), ["All", "Classic", "Fantasy", "Science Fiction"]);
}

#[test]
fn duplicate_product_ids_are_rejected() {
    let result = Catalog::new(vec![
        book("bk-1", "Dune", "Frank Herbert", "Science Fiction", 10.0, 0.0, 4.8),
        book("bk-1", "Emma", "Jane Austen", "Classic", 8.0, 0.0, 4.2),
    ]);
    assert!(result.is_err());
}

#[test]
fn catalog_parses_its_json_wire_form() {
    let raw = br#"[{
        "id": "bk-9",
        "title": "Snow Country",
        "author": "Yasunari Kawabata",
        "price": 11.5,
        "discount": 0.1,
        "genre": "Classic",
        "description": "A hot spring town in the mountains.",
        "coverImage": "/covers/bk-9.jpg",
        "format": "MOBI",
        "rating": 4.4,
        "pages": 175,
        "language": "English",
        "releaseDate": "1948-12-01"
    }]"#;

    let catalog = Catalog::from_json_slice(raw).expect("parses");
    assert_eq!(catalog.len(), 1);

    let product = &catalog.products()[0];
    assert_eq!(product.format, BookFormat::Mobi);
    assert_eq!(product.release_date, NaiveDate::from_ymd_opt(1948, 12, 1).expect("valid date"));
    assert!((product.effective_price() - 10.35).abs() < 1e-9);
}
