//! Item page assembly through the item service
mod common;

use common::{ScriptedTransport, fixture, site_config};
use rezka_scraper::RezkaScraper;
use rezka_scraper::domain::{CurrentWatch, PersonCredit, Rating};
use rezka_scraper::infrastructure::config::site;

const SERIES_URL: &str = "https://rezka.ag/series/thriller/646-vo-vse-tyazhkie-2008.html";
const MOVIE_URL: &str = "https://rezka.ag/films/drama/1171-zelenaya-milya-1999.html";

fn scraper_with(transport: &std::sync::Arc<ScriptedTransport>) -> RezkaScraper {
    RezkaScraper::with_transport(transport.clone(), &site_config())
}

#[tokio::test]
async fn series_page_is_fully_assembled() {
    let transport = ScriptedTransport::new();
    transport.on_get(SERIES_URL, &[], fixture("series_page.html"));
    let scraper = scraper_with(&transport);

    let item = scraper.items().item(SERIES_URL).await.unwrap();

    assert_eq!(item.id, 646);
    assert_eq!(item.url, SERIES_URL);
    assert_eq!(item.title, "Во все тяжкие");
    assert_eq!(item.original_title.as_deref(), Some("Breaking Bad"));
    assert_eq!(
        item.poster.as_deref(),
        Some("https://static.hdrezka.ac/i/2021/5/6/breaking-bad.jpg")
    );
    assert_eq!(item.slogan.as_deref(), Some("Remember my name"));
    assert_eq!(item.release_date.as_deref(), Some("2008-01-20"));
    assert_eq!(item.country.as_deref(), Some("США"));
    assert_eq!(item.quality.as_deref(), Some("720p"));
    assert_eq!(item.age_restriction, Some(18));
    assert_eq!(item.duration, Some(47));
    assert!(item.description.unwrap().starts_with("Школьный учитель химии"));

    assert_eq!(
        item.directors,
        Some(vec![PersonCredit {
            id: 17453,
            name: "Винс Гиллиган".to_string()
        }])
    );
    let actors = item.actors.unwrap();
    assert_eq!(actors.len(), 2);
    assert_eq!(actors[1].name, "Аарон Пол");

    let genres = item.genres.unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[0].url, "https://rezka.ag/series/thriller/");
    assert_eq!(genres[1].name, "Драмы");
    assert_eq!(genres[1].url, "https://rezka.ag/series/drama/");
    assert_eq!(item.collections.map(|links| links.len()), Some(1));
    assert_eq!(item.lists, None);

    let rating = item.rating.unwrap();
    assert_eq!(
        rating.imdb,
        Some(Rating {
            score: 9.5,
            votes: 2_134_567
        })
    );
    assert_eq!(rating.kinopoisk.map(|r| r.votes), Some(678_910));
    assert_eq!(rating.site.map(|r| r.votes), Some(12_345));
}

#[tokio::test]
async fn series_player_blocks_are_assembled() {
    let transport = ScriptedTransport::new();
    transport.on_get(SERIES_URL, &[], fixture("series_page.html"));
    let item = scraper_with(&transport).items().item(SERIES_URL).await.unwrap();

    let seasons = item.seasons.unwrap();
    assert_eq!(seasons.len(), 2);
    assert_eq!(seasons[0].title, "Сезон 1");
    assert_eq!(seasons[0].episodes.len(), 2);
    assert_eq!(seasons[1].id, 2);
    assert_eq!(seasons[1].episodes[0].title, "Серия 1");

    assert_eq!(
        item.current_watch,
        Some(CurrentWatch {
            translator_id: 111,
            season: Some(2),
            episode: Some(1),
        })
    );

    let translators = item.translators.unwrap();
    let ids: Vec<u64> = translators.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![111, 110, 238]);
    assert_eq!(translators[0].popularity, Some(62.5));
    assert_eq!(translators[0].paid, Some(false));
    assert_eq!(translators[1].popularity, Some(30.2));
    assert_eq!(translators[1].paid, Some(true));
    assert_eq!(translators[2].popularity, None);

    let roadmap = item.roadmap.unwrap();
    assert_eq!(roadmap.len(), 2);
    assert_eq!(roadmap[0].title.as_deref(), Some("Серая материя"));
    assert_eq!(roadmap[0].release_date.as_deref(), Some("2024-03-12"));
    assert_eq!(roadmap[1].episode, 3);
    assert_eq!(roadmap[1].title, None);

    let franchise = item.franchise.unwrap();
    assert_eq!(franchise.len(), 2);
    assert!(franchise[0].is_current);
    assert_eq!(franchise[0].url, None);
    assert_eq!(franchise[0].rating, Some(9.5));
    assert_eq!(franchise[1].position, Some(2));
    assert_eq!(
        franchise[1].url.as_deref(),
        Some("https://rezka.ag/films/drama/32105-el-kamino-2019.html")
    );
}

#[tokio::test]
async fn movie_page_degrades_optional_fields() {
    let transport = ScriptedTransport::new();
    transport.on_get(MOVIE_URL, &[], fixture("movie_page.html"));
    let item = scraper_with(&transport).items().item(MOVIE_URL).await.unwrap();

    assert_eq!(item.id, 1171);
    assert_eq!(item.title, "Зеленая миля");
    assert_eq!(item.original_title, None);
    assert_eq!(item.poster, None);
    assert_eq!(item.slogan, None);
    assert_eq!(item.age_restriction, None);
    assert_eq!(item.duration, Some(189));
    assert_eq!(item.quality.as_deref(), Some("1080p Ultra"));
    assert_eq!(item.directors, None);
    assert_eq!(item.actors, None);
    assert_eq!(item.seasons, None);
    assert_eq!(item.roadmap, None);
    assert_eq!(item.franchise, None);

    let rating = item.rating.unwrap();
    assert_eq!(rating.imdb.map(|r| r.votes), Some(1_450_000));
    assert_eq!(rating.kinopoisk, None);
    assert_eq!(rating.site, None);

    assert_eq!(
        item.current_watch,
        Some(CurrentWatch {
            translator_id: 56,
            season: None,
            episode: None,
        })
    );
    let translators = item.translators.unwrap();
    assert_eq!(translators.len(), 1);
    assert_eq!(translators[0].id, 56);
    assert_eq!(translators[0].name, "Unknown");
}

#[tokio::test]
async fn missing_slogan_leaves_every_other_field_intact() {
    let full_page = fixture("series_page.html");
    let slogan_row = "<tr><td class=\"l\"><h2>Слоган</h2>:</td><td>«Remember my name»</td></tr>";
    assert!(full_page.contains(slogan_row));
    let without_slogan = full_page.replace(slogan_row, "");

    let transport = ScriptedTransport::new();
    transport.on_get(SERIES_URL, &[], full_page);
    let complete = scraper_with(&transport).items().item(SERIES_URL).await.unwrap();

    let transport = ScriptedTransport::new();
    transport.on_get(SERIES_URL, &[], without_slogan);
    let degraded = scraper_with(&transport).items().item(SERIES_URL).await.unwrap();

    assert_eq!(complete.slogan.as_deref(), Some("Remember my name"));
    assert_eq!(degraded.slogan, None);
    let mut expected = complete;
    expected.slogan = None;
    assert_eq!(degraded, expected);
}

#[tokio::test]
async fn relative_url_is_resolved_against_base() {
    let transport = ScriptedTransport::new();
    transport.on_get(MOVIE_URL, &[], fixture("movie_page.html"));
    let item = scraper_with(&transport)
        .items()
        .item("/films/drama/1171-zelenaya-milya-1999.html")
        .await
        .unwrap();
    assert_eq!(item.url, MOVIE_URL);
}

#[tokio::test]
async fn page_without_title_fails() {
    let transport = ScriptedTransport::new();
    transport.on_get(MOVIE_URL, &[], "<html><body><p>Страница не найдена</p></body></html>");
    let err = scraper_with(&transport).items().item(MOVIE_URL).await.unwrap_err();
    assert!(err.to_string().contains(".b-post__title h1"));
}

#[tokio::test]
async fn url_without_id_fails() {
    let transport = ScriptedTransport::new();
    transport.on_get("https://rezka.ag/films/", &[], fixture("movie_page.html"));
    assert!(scraper_with(&transport).items().item("films/").await.is_err());
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let transport = ScriptedTransport::new();
    let err = scraper_with(&transport).items().item(MOVIE_URL).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn item_by_id_resolves_through_quick_content() {
    let transport = ScriptedTransport::new();
    transport.on_post(site::QUICK_CONTENT, &[("id", "646")], fixture("quick_content.html"));
    transport.on_get(SERIES_URL, &[], fixture("series_page.html"));

    let item = scraper_with(&transport).items().item_by_id(646).await.unwrap();

    assert_eq!(item.id, 646);
    let requests = transport.requests();
    assert_eq!(requests[0].param("is_touch"), Some("1"));
    assert_eq!(requests[1].target, SERIES_URL);
}
