//! Person pages and id-based person lookup
mod common;

use common::{ScriptedTransport, fixture, site_config};
use rezka_scraper::domain::Career;
use rezka_scraper::infrastructure::config::site;
use rezka_scraper::{RezkaScraper, ScraperError};
use std::sync::Arc;

const PERSON_URL: &str = "https://rezka.ag/person/34053-bryan-cranston/";

fn scraper_with(transport: &Arc<ScriptedTransport>) -> RezkaScraper {
    RezkaScraper::with_transport(transport.clone(), &site_config())
}

#[tokio::test]
async fn person_page_is_assembled() {
    let transport = ScriptedTransport::new();
    transport.on_get(PERSON_URL, &[], fixture("person_page.html"));

    let person = scraper_with(&transport).persons().person(PERSON_URL).await.unwrap();

    assert_eq!(person.id, 34053);
    assert_eq!(person.name, "Брайан Крэнстон");
    assert_eq!(person.original_name.as_deref(), Some("Bryan Cranston"));
    assert_eq!(person.photo.as_deref(), Some("https://static.hdrezka.ac/person/34053.jpg"));
    assert_eq!(
        person.careers,
        vec![Career::Actor, Career::Producer, Career::Writer]
    );
    assert_eq!(person.height, Some(1.79));
    assert_eq!(person.birth_date.as_deref(), Some("1956-03-07"));
    assert_eq!(person.birth_place.as_deref(), Some("Голливуд, Калифорния, США"));
    assert_eq!(person.death_date, None);
    assert_eq!(person.death_place, None);
}

#[tokio::test]
async fn filmography_is_grouped_by_role() {
    let transport = ScriptedTransport::new();
    transport.on_get(PERSON_URL, &[], fixture("person_page.html"));

    let person = scraper_with(&transport).persons().person(PERSON_URL).await.unwrap();

    assert_eq!(person.filmography.len(), 2);
    let acting = &person.filmography["Актер"];
    assert_eq!(acting.len(), 2);
    assert_eq!(acting[0].kind, "series");
    assert_eq!(acting[0].details.as_deref(), Some("2008, Уолтер Уайт"));
    assert_eq!(acting[1].kind, "movie");
    assert_eq!(acting[1].url, "https://rezka.ag/films/comedy/48914-kaif-2020.html");
    assert_eq!(person.filmography["Продюсер"].len(), 1);
}

#[tokio::test]
async fn person_by_ids_follows_returned_link() {
    let transport = ScriptedTransport::new();
    transport.on_post(
        site::PERSON_INFO,
        &[("id", "34053"), ("pid", "646")],
        format!(r#"{{"success":true,"message":"","person":{{"link":"{PERSON_URL}"}}}}"#),
    );
    transport.on_get(PERSON_URL, &[], fixture("person_page.html"));

    let person = scraper_with(&transport)
        .persons()
        .person_by_ids(34053, 646)
        .await
        .unwrap();
    assert_eq!(person.name, "Брайан Крэнстон");
}

#[tokio::test]
async fn person_lookup_rejection_carries_message() {
    let transport = ScriptedTransport::new();
    transport.on_post(
        site::PERSON_INFO,
        &[],
        r#"{"success":false,"message":"Персона не найдена"}"#,
    );

    let err = scraper_with(&transport)
        .persons()
        .person_by_ids(1, 2)
        .await
        .unwrap_err();
    match err {
        ScraperError::Rejected { message } => assert_eq!(message, "Персона не найдена"),
        other => panic!("unexpected error: {other}"),
    }
}
