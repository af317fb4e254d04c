/*!
 * Tests for the translation resolution pipeline
 */

use std::sync::Arc;

use transrelay::dictionary::Dictionary;
use transrelay::errors::ResolveError;
use transrelay::providers::mock::{MockFailure, MockProvider};
use transrelay::translation::{Provenance, TranslationRequest, TranslationResolver};

use crate::common::{builtin_dictionary, init_logging, resolver_with};

fn failing() -> MockProvider {
    MockProvider::failing(MockFailure::Connection)
}

/// The shipped phrase table, written out independently of the dictionary module
const EXPECTED_ENTRIES: &[(&str, &[(&str, &str)])] = &[
    ("en", &[
        ("fr", "bonjour"), ("es", "hola"), ("de", "hallo"), ("it", "ciao"), ("pt", "olá"),
        ("ja", "こんにちは"), ("ko", "안녕하세요"), ("zh", "你好"), ("ar", "مرحبا"), ("ru", "здравствуйте"),
    ]),
    ("woman", &[
        ("fr", "femme"), ("es", "mujer"), ("de", "frau"), ("it", "donna"), ("pt", "mulher"),
        ("ja", "女性"), ("ko", "여성"), ("zh", "女人"), ("ar", "امرأة"), ("ru", "женщина"),
    ]),
    ("man", &[
        ("fr", "homme"), ("es", "hombre"), ("de", "mann"), ("it", "uomo"), ("pt", "homem"),
        ("ja", "男性"), ("ko", "남성"), ("zh", "男人"), ("ar", "رجل"), ("ru", "мужчина"),
    ]),
    ("hello", &[
        ("fr", "bonjour"), ("es", "hola"), ("de", "hallo"), ("it", "ciao"), ("pt", "olá"),
        ("ja", "こんにちは"), ("ko", "안녕하세요"), ("zh", "你好"), ("ar", "مرحبا"), ("ru", "здравствуйте"),
    ]),
    ("thank you", &[
        ("fr", "merci"), ("es", "gracias"), ("de", "danke"), ("it", "grazie"), ("pt", "obrigado"),
        ("ja", "ありがとう"), ("ko", "감사합니다"), ("zh", "谢谢"), ("ar", "شكرا"), ("ru", "спасибо"),
    ]),
    ("goodbye", &[
        ("fr", "au revoir"), ("es", "adiós"), ("de", "auf wiedersehen"), ("it", "arrivederci"), ("pt", "adeus"),
        ("ja", "さようなら"), ("ko", "안녕히 가세요"), ("zh", "再见"), ("ar", "مع السلامة"), ("ru", "до свидания"),
    ]),
    ("yes", &[
        ("fr", "oui"), ("es", "sí"), ("de", "ja"), ("it", "sì"), ("pt", "sim"),
        ("ja", "はい"), ("ko", "네"), ("zh", "是"), ("ar", "نعم"), ("ru", "да"),
    ]),
    ("no", &[
        ("fr", "non"), ("es", "no"), ("de", "nein"), ("it", "no"), ("pt", "não"),
        ("ja", "いいえ"), ("ko", "아니오"), ("zh", "不"), ("ar", "لا"), ("ru", "нет"),
    ]),
    ("water", &[
        ("fr", "eau"), ("es", "agua"), ("de", "wasser"), ("it", "acqua"), ("pt", "água"),
        ("ja", "水"), ("ko", "물"), ("zh", "水"), ("ar", "ماء"), ("ru", "вода"),
    ]),
    ("food", &[
        ("fr", "nourriture"), ("es", "comida"), ("de", "essen"), ("it", "cibo"), ("pt", "comida"),
        ("ja", "食べ物"), ("ko", "음식"), ("zh", "食物"), ("ar", "طعام"), ("ru", "еда"),
    ]),
    ("house", &[
        ("fr", "maison"), ("es", "casa"), ("de", "haus"), ("it", "casa"), ("pt", "casa"),
        ("ja", "家"), ("ko", "집"), ("zh", "房子"), ("ar", "منزل"), ("ru", "дом"),
    ]),
    ("car", &[
        ("fr", "voiture"), ("es", "coche"), ("de", "auto"), ("it", "macchina"), ("pt", "carro"),
        ("ja", "車"), ("ko", "자동차"), ("zh", "汽车"), ("ar", "سيارة"), ("ru", "машина"),
    ]),
    ("love", &[
        ("fr", "amour"), ("es", "amor"), ("de", "liebe"), ("it", "amore"), ("pt", "amor"),
        ("ja", "愛"), ("ko", "사랑"), ("zh", "爱"), ("ar", "حب"), ("ru", "любовь"),
    ]),
    ("friend", &[
        ("fr", "ami"), ("es", "amigo"), ("de", "freund"), ("it", "amico"), ("pt", "amigo"),
        ("ja", "友達"), ("ko", "친구"), ("zh", "朋友"), ("ar", "صديق"), ("ru", "друг"),
    ]),
    ("free", &[
        ("fr", "gratuit"), ("es", "gratis"), ("de", "kostenlos"), ("it", "gratuito"), ("pt", "grátis"),
        ("ja", "無料"), ("ko", "무료"), ("zh", "免费"), ("ar", "مجاني"), ("ru", "бесплатно"),
    ]),
    // Spanish source words
    ("mujer", &[("en", "woman"), ("fr", "femme"), ("de", "frau"), ("it", "donna"), ("pt", "mulher")]),
    ("hombre", &[("en", "man"), ("fr", "homme"), ("de", "mann"), ("it", "uomo"), ("pt", "homem")]),
    ("hola", &[("en", "hello"), ("fr", "bonjour"), ("de", "hallo"), ("it", "ciao"), ("pt", "olá")]),
    ("gracias", &[("en", "thank you"), ("fr", "merci"), ("de", "danke"), ("it", "grazie"), ("pt", "obrigado")]),
    ("agua", &[("en", "water"), ("fr", "eau"), ("de", "wasser"), ("it", "acqua"), ("pt", "água")]),
    ("casa", &[("en", "house"), ("fr", "maison"), ("de", "haus"), ("it", "casa"), ("pt", "casa")]),
    ("amor", &[("en", "love"), ("fr", "amour"), ("de", "liebe"), ("it", "amore"), ("pt", "amor")]),
    ("gratis", &[("en", "free"), ("fr", "gratuit"), ("de", "kostenlos"), ("it", "gratuito"), ("pt", "grátis")]),
    // French source words
    ("femme", &[("en", "woman"), ("es", "mujer"), ("de", "frau"), ("it", "donna"), ("pt", "mulher")]),
    ("homme", &[("en", "man"), ("es", "hombre"), ("de", "mann"), ("it", "uomo"), ("pt", "homem")]),
    ("bonjour", &[("en", "hello"), ("es", "hola"), ("de", "hallo"), ("it", "ciao"), ("pt", "olá")]),
    ("merci", &[("en", "thank you"), ("es", "gracias"), ("de", "danke"), ("it", "grazie"), ("pt", "obrigado")]),
    ("gratuit", &[("en", "free"), ("es", "gratis"), ("de", "kostenlos"), ("it", "gratuito"), ("pt", "grátis")]),
];

#[tokio::test]
async fn test_resolve_withEveryBuiltinKeyAndFailingProvider_shouldReturnExactEntry() {
    init_logging();
    let (resolver, _) = resolver_with(failing());

    let mut shipped: Vec<&str> = Dictionary::builtin().entries().map(|(phrase, _)| phrase).collect();
    shipped.sort_unstable();
    let mut expected_keys: Vec<&str> = EXPECTED_ENTRIES.iter().map(|(phrase, _)| *phrase).collect();
    expected_keys.sort_unstable();
    assert_eq!(shipped, expected_keys);
    assert_eq!(expected_keys.len(), 28);

    let mut checked = 0;
    for (phrase, targets) in EXPECTED_ENTRIES {
        let shipped_targets = Dictionary::builtin()
            .entries()
            .find(|(key, _)| key == phrase)
            .map(|(_, translations)| translations.len());
        assert_eq!(shipped_targets, Some(targets.len()), "{}", phrase);
        for (target, expected) in targets.iter() {
            for source in ["auto", "en", "es"] {
                let request = TranslationRequest::new(*phrase, *target).with_source(source);
                let result = resolver.resolve(&request).await.unwrap();
                assert_eq!(result.translated_text, *expected, "{} -> {} (from {})", phrase, target, source);
                assert_eq!(result.provenance, Provenance::Fallback);
            }
            checked += 1;
        }
    }
    assert_eq!(checked, 15 * 10 + 13 * 5);
}

#[tokio::test]
async fn test_resolve_withDictionaryKeyAndFailingProvider_shouldReturnEntry() {
    init_logging();
    let (resolver, _) = resolver_with(failing());

    for (text, target, expected) in [("hello", "fr", "bonjour"), ("thank you", "ja", "ありがとう"), ("merci", "en", "thank you")] {
        let request = TranslationRequest::new(text, target).with_source("en");
        let result = resolver.resolve(&request).await.unwrap();
        assert_eq!(result.translated_text, expected);
        assert_eq!(result.provenance, Provenance::Fallback);
    }
}

#[tokio::test]
async fn test_resolve_withUnknownSingleWord_shouldReturnIdentity() {
    let (resolver, _) = resolver_with(MockProvider::failing(MockFailure::Api));

    let result = resolver.resolve(&TranslationRequest::new("Xylophone", "de")).await.unwrap();

    assert_eq!(result.translated_text, "Xylophone");
    assert_eq!(result.provenance, Provenance::Fallback);
}

#[tokio::test]
async fn test_resolve_withPartiallyKnownPhrase_shouldSubstituteWords() {
    let (resolver, _) = resolver_with(MockProvider::failing(MockFailure::Parse));

    let result = resolver.resolve(&TranslationRequest::new("good woman", "fr")).await.unwrap();

    assert_eq!(result.translated_text, "good femme");
    assert_eq!(result.provenance, Provenance::Fallback);
}

#[tokio::test]
async fn test_resolve_shouldIgnoreCaseAndWhitespace() {
    let (resolver, _) = resolver_with(failing());

    let padded = resolver.resolve(&TranslationRequest::new("  Hello  ", "fr")).await.unwrap();
    let plain = resolver.resolve(&TranslationRequest::new("hello", "fr")).await.unwrap();

    assert_eq!(padded, plain);
    assert_eq!(padded.translated_text, "bonjour");
}

#[tokio::test]
async fn test_resolve_withMarkupFromProvider_shouldStripTags() {
    let (resolver, _) = resolver_with(MockProvider::returning("<b>bonjour</b>"));

    let result = resolver.resolve(&TranslationRequest::new("hello", "fr")).await.unwrap();

    assert_eq!(result.translated_text, "bonjour");
    assert_eq!(result.provenance, Provenance::External);
}

#[tokio::test]
async fn test_resolve_withWorkingProvider_shouldPreferExternalOverDictionary() {
    let (resolver, provider) = resolver_with(MockProvider::returning("ciao"));

    let request = TranslationRequest::new("hello", "it").with_source("en");
    let result = resolver.resolve(&request).await.unwrap();

    assert_eq!(result.translated_text, "ciao");
    assert_eq!(result.provenance, Provenance::External);

    let seen = provider.last_request().expect("provider should be called");
    assert_eq!(seen.text, "hello");
    assert_eq!(seen.source_language, "en");
    assert_eq!(seen.target_language, "it");
}

#[tokio::test]
async fn test_resolve_withExternalTextNotInDictionary_shouldStillReturnIt() {
    let (resolver, _) = resolver_with(MockProvider::returning("Guten Morgen"));

    let result = resolver.resolve(&TranslationRequest::new("good morning", "de")).await.unwrap();

    assert_eq!(result.translated_text, "Guten Morgen");
    assert_eq!(result.provenance, Provenance::External);
}

#[tokio::test]
async fn test_resolve_withEmptyTextOrTarget_shouldRejectWithoutCallingProvider() {
    let (resolver, provider) = resolver_with(MockProvider::returning("ciao"));

    let empty_text = resolver.resolve(&TranslationRequest::new("", "fr")).await;
    let empty_target = resolver.resolve(&TranslationRequest::new("hello", "")).await;

    assert!(matches!(empty_text, Err(ResolveError::InvalidRequest(_))));
    assert!(matches!(empty_target, Err(ResolveError::InvalidRequest(_))));
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_resolve_shouldMakeExactlyOneExternalAttempt() {
    let (resolver, provider) = resolver_with(failing());

    resolver.resolve(&TranslationRequest::new("water", "pt")).await.unwrap();
    assert_eq!(provider.request_count(), 1);

    resolver.resolve(&TranslationRequest::new("water", "pt")).await.unwrap();
    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_resolve_withEmptyExternalText_shouldFallBack() {
    let (resolver, _) = resolver_with(MockProvider::returning("<br/>"));

    let result = resolver.resolve(&TranslationRequest::new("car", "it")).await.unwrap();

    assert_eq!(result.translated_text, "macchina");
    assert_eq!(result.provenance, Provenance::Fallback);
}

#[tokio::test]
async fn test_resolve_withDefaultSource_shouldSendAuto() {
    let (resolver, provider) = resolver_with(MockProvider::echo());

    resolver.resolve(&TranslationRequest::new("love", "ko")).await.unwrap();

    assert_eq!(provider.last_request().unwrap().source_language, "auto");
}

#[tokio::test]
async fn test_offlineResolver_shouldAnswerFromDictionary() {
    let resolver = TranslationResolver::offline(builtin_dictionary());
    assert!(!resolver.has_provider());

    let result = resolver.resolve(&TranslationRequest::new("friend", "ru")).await.unwrap();

    assert_eq!(result.translated_text, "друг");
    assert_eq!(result.provenance, Provenance::Fallback);
}

#[tokio::test]
async fn test_resolve_withConcurrentRequests_shouldStayIndependent() {
    let provider = MockProvider::slow(20);
    let handle = provider.clone();
    let resolver = Arc::new(TranslationResolver::new(Arc::new(provider), builtin_dictionary()));

    let tasks: Vec<_> = ["fr", "de", "es", "it"]
        .into_iter()
        .map(|target| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move {
                resolver.resolve(&TranslationRequest::new("hello", target)).await
            })
        })
        .collect();

    for (task, target) in tasks.into_iter().zip(["fr", "de", "es", "it"]) {
        let result = task.await.unwrap().unwrap();
        assert_eq!(result.translated_text, format!("[{}] hello", target));
        assert_eq!(result.provenance, Provenance::External);
    }
    assert_eq!(handle.request_count(), 4);
}
