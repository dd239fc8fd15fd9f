//! Integration tests for the concurrent loader.

use async_trait::async_trait;
use emodl_core::{ProviderKind, UserScope};
use emodl_fetch::{FetchContext, FetchError};
use emodl_providers::seventv::{SevenTvFile, SevenTvHost};
use emodl_providers::{BttvEmote, EmoteSource, FfzEmote, NativeEmote, SevenTvEmote, UserEmotes};
use emodl_store::{
    ConflictReport, EmoteLoader, FetchStage, LoadStatus, LoaderOptions, ProviderOptions,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

// ============================================================================
// Fake Source
// ============================================================================

#[derive(Clone)]
enum Behavior {
    Records(Vec<NativeEmote>),
    Sets(Vec<String>),
    Fail(&'static str),
    Hang,
    Panic,
}

impl Behavior {
    async fn records(&self, delay: Duration) -> Result<Vec<NativeEmote>, FetchError> {
        tokio::time::sleep(delay).await;
        match self {
            Self::Records(records) => Ok(records.clone()),
            Self::Sets(_) => Ok(Vec::new()),
            Self::Fail(message) => Err(FetchError::Api {
                status: 500,
                message: (*message).to_string(),
            }),
            Self::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
            Self::Panic => {
                let empty: Vec<NativeEmote> = Vec::new();
                Ok(vec![empty[0].clone()])
            }
        }
    }
}

struct FakeSource {
    kind: ProviderKind,
    global: Behavior,
    user: Behavior,
    sets: HashMap<String, Behavior>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeSource {
    fn new(kind: ProviderKind, global: Behavior) -> Self {
        Self {
            kind,
            global,
            user: Behavior::Records(Vec::new()),
            sets: HashMap::new(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    fn user(mut self, user: Behavior) -> Self {
        self.user = user;
        self
    }

    fn set(mut self, id: &str, behavior: Behavior) -> Self {
        self.sets.insert(id.to_string(), behavior);
        self
    }

    fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl EmoteSource for FakeSource {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn fetch_global(&self, _ctx: &FetchContext) -> Result<Vec<NativeEmote>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.global.records(self.delay).await
    }

    async fn fetch_user(
        &self,
        _ctx: &FetchContext,
        _scope: &UserScope,
    ) -> Result<UserEmotes, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.user {
            Behavior::Sets(ids) => Ok(UserEmotes::Sets(ids.clone())),
            other => other.records(Duration::ZERO).await.map(UserEmotes::Emotes),
        }
    }

    async fn fetch_set(
        &self,
        _ctx: &FetchContext,
        set_id: &str,
    ) -> Result<Vec<NativeEmote>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.sets.get(set_id) {
            Some(behavior) => behavior.records(self.delay).await,
            None => Err(FetchError::Unsupported(format!("unknown set {set_id}"))),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn bttv(id: &str, name: &str) -> NativeEmote {
    NativeEmote::Bttv(BttvEmote::new(id, name))
}

fn ffz(id: u64, name: &str) -> NativeEmote {
    NativeEmote::Ffz(FfzEmote {
        id,
        name: name.to_string(),
        height: 32,
        width: 32,
        urls: HashMap::from([("1".to_string(), format!("https://cdn.frankerfacez.com/emote/{id}/1"))]),
    })
}

fn seventv(id: &str, name: &str) -> NativeEmote {
    NativeEmote::SevenTv(SevenTvEmote {
        id: id.to_string(),
        name: name.to_string(),
        animated: false,
        host: SevenTvHost {
            url: format!("//cdn.7tv.app/emote/{id}"),
            files: vec![SevenTvFile {
                name: "1x.webp".to_string(),
                width: 32,
                height: 32,
                format: "WEBP".to_string(),
                ..Default::default()
            }],
        },
    })
}

fn loader(options: LoaderOptions, sources: Vec<Arc<FakeSource>>) -> EmoteLoader {
    let sources = sources
        .into_iter()
        .map(|s| s as Arc<dyn EmoteSource>)
        .collect();
    EmoteLoader::with_sources(options, sources)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_end_to_end_two_providers() {
    let options = LoaderOptions::default().with_provider(ProviderKind::Ffz, ProviderOptions::disabled());
    let loader = loader(
        options,
        vec![
            Arc::new(FakeSource::new(ProviderKind::Bttv, Behavior::Records(vec![bttv("1", "Kappa")]))),
            Arc::new(FakeSource::new(ProviderKind::Ffz, Behavior::Fail("must not run"))),
            Arc::new(FakeSource::new(
                ProviderKind::SevenTv,
                Behavior::Records(vec![seventv("2", "PogChamp")]),
            )),
        ],
    );

    let outcome = loader.load().await;

    assert_eq!(outcome.status(), LoadStatus::Complete);
    assert!(ConflictReport::from_catalog(&outcome.catalog).is_empty());
    let catalog = outcome.into_result().unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("Kappa").unwrap().id, "1");
    assert_eq!(catalog.get("PogChamp").unwrap().id, "2");
}

#[tokio::test]
async fn test_merge_completeness() {
    let loader = loader(
        LoaderOptions::default(),
        vec![
            Arc::new(FakeSource::new(
                ProviderKind::Bttv,
                Behavior::Records(vec![bttv("1", "Kappa"), bttv("2", "LUL")]),
            )),
            Arc::new(FakeSource::new(ProviderKind::Ffz, Behavior::Records(vec![ffz(3, "CatBag")]))),
            Arc::new(FakeSource::new(
                ProviderKind::SevenTv,
                Behavior::Records(vec![seventv("4", "EZ"), seventv("5", "Clap")]),
            )),
        ],
    );

    let outcome = loader.load().await;
    let catalog = &outcome.catalog;

    assert_eq!(outcome.status(), LoadStatus::Complete);
    assert_eq!(catalog.len(), catalog.bttv.len() + catalog.ffz.len() + catalog.seven_tv.len());
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.merged_batches(), 3);
}

#[tokio::test]
async fn test_errors_are_joined_not_shadowed() {
    let loader = loader(
        LoaderOptions::default(),
        vec![
            Arc::new(FakeSource::new(ProviderKind::Bttv, Behavior::Fail("bttv down"))),
            Arc::new(FakeSource::new(ProviderKind::Ffz, Behavior::Fail("ffz down"))),
            Arc::new(FakeSource::new(
                ProviderKind::SevenTv,
                Behavior::Records(vec![seventv("1", "EZ")]),
            )),
        ],
    );

    let outcome = loader.load().await;

    assert_eq!(outcome.status(), LoadStatus::Partial);
    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(outcome.errors.to_string(), "BTTV global: bttv down\nFFZ global: ffz down");
    assert_eq!(outcome.catalog.len(), 1);
    assert!(!outcome.timed_out);
}

#[tokio::test]
async fn test_total_failure() {
    let options = LoaderOptions::default().with_provider(ProviderKind::Ffz, ProviderOptions::disabled());
    let loader = loader(
        options,
        vec![
            Arc::new(FakeSource::new(ProviderKind::Bttv, Behavior::Fail("a"))),
            Arc::new(FakeSource::new(ProviderKind::SevenTv, Behavior::Fail("b"))),
        ],
    );

    let outcome = loader.load().await;

    assert_eq!(outcome.status(), LoadStatus::Failed);
    assert!(outcome.catalog.is_empty());
    assert!(!outcome.into_result().unwrap_err().is_timeout());
}

#[tokio::test]
async fn test_deadline_returns_partial_catalog() {
    let options = LoaderOptions::default().with_deadline(Duration::from_millis(300));
    let loader = loader(
        options,
        vec![
            Arc::new(FakeSource::new(ProviderKind::Bttv, Behavior::Records(vec![bttv("1", "Kappa")]))),
            Arc::new(FakeSource::new(ProviderKind::Ffz, Behavior::Hang)),
            Arc::new(FakeSource::new(ProviderKind::SevenTv, Behavior::Fail("7tv down"))),
        ],
    );

    let started = Instant::now();
    let outcome = loader.load().await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(outcome.timed_out);
    assert_eq!(outcome.status(), LoadStatus::Partial);
    assert_eq!(outcome.catalog.len(), 1);
    assert!(outcome.catalog.ffz.is_empty());
    assert_eq!(outcome.errors.len(), 1);

    let err = outcome.into_result().unwrap_err();
    assert!(err.is_timeout());
    assert!(err.to_string().starts_with("deadline of 300ms exceeded"));
}

#[tokio::test]
async fn test_deadline_with_nothing_merged() {
    let options = LoaderOptions::default()
        .with_deadline(Duration::from_millis(100))
        .with_provider(ProviderKind::Ffz, ProviderOptions::disabled())
        .with_provider(ProviderKind::SevenTv, ProviderOptions::disabled());
    let loader = loader(options, vec![Arc::new(FakeSource::new(ProviderKind::Bttv, Behavior::Hang))]);

    let outcome = loader.load().await;

    assert!(outcome.timed_out);
    assert_eq!(outcome.status(), LoadStatus::Failed);
}

#[tokio::test]
async fn test_seventv_set_fan_out_waits_for_every_set() {
    let seven_tv = FakeSource::new(
        ProviderKind::SevenTv,
        Behavior::Records(vec![seventv("g", "EZ")]),
    )
    .user(Behavior::Sets(vec!["a".into(), "b".into(), "c".into()]))
    .set("a", Behavior::Records(vec![seventv("a1", "forsenPls")]))
    .set("b", Behavior::Records(vec![seventv("b1", "xqcL"), seventv("b2", "Okayge")]))
    .set("c", Behavior::Fail("Unknown Emote Set"))
    .delay(Duration::from_millis(50));
    let seven_tv = Arc::new(seven_tv);

    let options = LoaderOptions::default()
        .with_provider(ProviderKind::Bttv, ProviderOptions::disabled())
        .with_provider(ProviderKind::Ffz, ProviderOptions::disabled())
        .with_provider(
            ProviderKind::SevenTv,
            ProviderOptions::default().with_scope(UserScope::platform("twitch", "22484632")),
        );
    let loader = loader(options, vec![Arc::clone(&seven_tv)]);

    let outcome = loader.load().await;

    assert!(!outcome.timed_out);
    assert_eq!(outcome.catalog.len(), 4);
    assert_eq!(outcome.catalog.merged_batches(), 3);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors.failures()[0].stage, FetchStage::Set("c".to_string()));
    // global + user + three sets
    assert_eq!(seven_tv.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_user_scope_emotes_are_merged() {
    let bttv_source = FakeSource::new(ProviderKind::Bttv, Behavior::Records(vec![bttv("1", "Kappa")]))
        .user(Behavior::Records(vec![bttv("2", "forsenE")]));

    let options = LoaderOptions::default()
        .with_provider(
            ProviderKind::Bttv,
            ProviderOptions::default().with_scope(UserScope::platform("twitch", "22484632")),
        )
        .with_provider(ProviderKind::Ffz, ProviderOptions::disabled())
        .with_provider(ProviderKind::SevenTv, ProviderOptions::disabled());
    let loader = loader(options, vec![Arc::new(bttv_source)]);

    let outcome = loader.load().await;

    assert_eq!(outcome.status(), LoadStatus::Complete);
    assert_eq!(outcome.catalog.bttv.len(), 2);
    assert_eq!(outcome.catalog.merged_batches(), 2);
}

#[tokio::test]
async fn test_disabled_provider_is_never_called() {
    let ffz_source = Arc::new(FakeSource::new(ProviderKind::Ffz, Behavior::Records(vec![ffz(1, "CatBag")])));
    let options = LoaderOptions::default().with_provider(ProviderKind::Ffz, ProviderOptions::disabled());
    let loader = loader(options, vec![Arc::clone(&ffz_source)]);

    let outcome = loader.load().await;

    assert_eq!(ffz_source.calls.load(Ordering::SeqCst), 0);
    assert!(outcome.catalog.is_empty());
    assert_eq!(outcome.status(), LoadStatus::Complete);
}

#[tokio::test]
async fn test_conflicting_names_are_reported() {
    let options = LoaderOptions::default().with_provider(ProviderKind::Ffz, ProviderOptions::disabled());
    let loader = loader(
        options,
        vec![
            Arc::new(FakeSource::new(
                ProviderKind::Bttv,
                Behavior::Records(vec![bttv("1", "Kappa"), bttv("2", "LUL")]),
            )),
            Arc::new(FakeSource::new(
                ProviderKind::SevenTv,
                Behavior::Records(vec![seventv("3", "Kappa")]),
            )),
        ],
    );

    let outcome = loader.load().await;
    let report = ConflictReport::from_catalog(&outcome.catalog);

    // One winner per name; which one depends on completion order.
    assert_eq!(outcome.catalog.len(), 2);
    assert!(["1", "3"].contains(&outcome.catalog.get("Kappa").unwrap().id.as_str()));

    assert_eq!(report.total(), 1);
    let text = report.to_string();
    assert_eq!(text.matches("Kappa").count(), 1);
    assert_eq!(text.lines().count(), report.total() + 1);
}

#[tokio::test]
async fn test_unnormalizable_records_stay_out_of_both_maps() {
    let broken = NativeEmote::Ffz(FfzEmote {
        id: 9,
        name: "Broken".to_string(),
        height: 0,
        width: 0,
        urls: HashMap::new(),
    });
    let options = LoaderOptions::default()
        .with_provider(ProviderKind::Bttv, ProviderOptions::disabled())
        .with_provider(ProviderKind::SevenTv, ProviderOptions::disabled());
    let loader = loader(
        options,
        vec![Arc::new(FakeSource::new(ProviderKind::Ffz, Behavior::Records(vec![broken, ffz(1, "CatBag")])))],
    );

    let outcome = loader.load().await;

    assert_eq!(outcome.catalog.len(), 1);
    assert_eq!(outcome.catalog.ffz.len(), 1);
    assert!(outcome.catalog.get("Broken").is_none());
}

#[tokio::test]
async fn test_panicking_source_is_reported() {
    let options = LoaderOptions::default().with_provider(ProviderKind::SevenTv, ProviderOptions::disabled());
    let loader = loader(
        options,
        vec![
            Arc::new(FakeSource::new(ProviderKind::Bttv, Behavior::Records(vec![bttv("1", "Kappa")]))),
            Arc::new(FakeSource::new(ProviderKind::Ffz, Behavior::Panic)),
        ],
    );

    let outcome = loader.load().await;

    assert_eq!(outcome.status(), LoadStatus::Partial);
    assert!(!outcome.timed_out);
    assert!(!outcome.merge_failed);
    assert_eq!(outcome.catalog.len(), 1);
    assert!(outcome.catalog.ffz.is_empty());

    let failures = outcome.errors.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].provider, ProviderKind::Ffz);
    assert_eq!(failures[0].stage, FetchStage::Global);
    assert!(matches!(failures[0].error, FetchError::TaskPanicked(_)));
}

#[tokio::test]
async fn test_panicking_set_task_is_reported() {
    let seventv_source = FakeSource::new(ProviderKind::SevenTv, Behavior::Records(Vec::new()))
        .user(Behavior::Sets(vec!["ok".into(), "boom".into()]))
        .set("ok", Behavior::Records(vec![seventv("a", "EZ")]))
        .set("boom", Behavior::Panic);
    let options = LoaderOptions::default()
        .with_provider(ProviderKind::Bttv, ProviderOptions::disabled())
        .with_provider(ProviderKind::Ffz, ProviderOptions::disabled())
        .with_provider(
            ProviderKind::SevenTv,
            ProviderOptions::default().with_scope(UserScope::account("u")),
        );
    let loader = loader(options, vec![Arc::new(seventv_source)]);

    let outcome = loader.load().await;

    assert_eq!(outcome.status(), LoadStatus::Partial);
    assert!(outcome.catalog.get("EZ").is_some());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors.failures()[0].stage, FetchStage::Set("boom".into()));
    assert!(outcome.errors.to_string().starts_with("7TV set boom: Fetch task panicked"));
}
