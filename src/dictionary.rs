/*!
 * Static phrase dictionary used when the external service is unavailable.
 *
 * The table maps a lowercase source phrase (a single word or a short phrase
 * such as `thank you`) to its translations, keyed by two-letter target code.
 * It is built once at startup and never mutated afterwards, so it can be
 * shared between concurrent requests without locking.
 */

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Translations of one source phrase, keyed by target language code
pub type TargetTranslations = HashMap<String, String>;

/// Built-in entries: (source phrase, [(target code, translation)])
const BUILTIN_ENTRIES: &[(&str, &[(&str, &str)])] = &[
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

static BUILTIN: Lazy<Dictionary> = Lazy::new(|| {
    let entries = BUILTIN_ENTRIES
        .iter()
        .map(|(phrase, translations)| {
            let targets = translations
                .iter()
                .map(|(code, text)| (code.to_string(), text.to_string()))
                .collect();
            (phrase.to_string(), targets)
        })
        .collect();
    Dictionary::from_entries(entries)
});

/// Read-only phrase table
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, TargetTranslations>,
}

impl Dictionary {
    /// Build a dictionary from raw entries, normalizing source keys
    pub fn from_entries(entries: HashMap<String, TargetTranslations>) -> Self {
        let mut folded: HashMap<String, TargetTranslations> = HashMap::new();
        for (phrase, targets) in entries {
            folded.entry(normalize(&phrase)).or_default().extend(targets);
        }
        Self { entries: folded }
    }

    /// The entries shipped with the relay
    pub fn builtin() -> &'static Dictionary {
        &BUILTIN
    }

    /// Load extra entries from a JSON file shaped like
    /// `{ "phrase": { "fr": "...", "es": "..." } }`
    pub fn load_extension<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary file: {}", path.display()))?;
        let entries: HashMap<String, TargetTranslations> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dictionary file: {}", path.display()))?;

        debug!("Loaded {} dictionary entries from {}", entries.len(), path.display());
        Ok(Self::from_entries(entries))
    }

    /// Merge another dictionary over this one; the other side wins per target code
    pub fn merge(mut self, other: Dictionary) -> Self {
        for (phrase, targets) in other.entries {
            self.entries.entry(phrase).or_default().extend(targets);
        }
        self
    }

    /// Look up a phrase for a target language (case-insensitive, trimmed)
    pub fn lookup(&self, phrase: &str, target_language: &str) -> Option<&str> {
        self.lookup_normalized(&normalize(phrase), target_language)
    }

    fn lookup_normalized(&self, phrase: &str, target_language: &str) -> Option<&str> {
        self.entries
            .get(phrase)
            .and_then(|targets| targets.get(target_language))
            .map(String::as_str)
    }

    /// Translate text using only this table.
    ///
    /// Tries the whole phrase first, then word by word for multi-word input.
    /// Unknown words are kept as they are. When nothing matches the original
    /// text comes back untouched.
    pub fn translate(&self, text: &str, target_language: &str) -> String {
        let normalized = normalize(text);

        if let Some(translation) = self.lookup_normalized(&normalized, target_language) {
            return translation.to_string();
        }

        if normalized.contains(' ') {
            let words: Vec<&str> = normalized.split(' ').collect();
            let translated: Vec<&str> = words
                .iter()
                .map(|word| self.lookup_normalized(word, target_language).unwrap_or(*word))
                .collect();

            // A word that maps onto itself does not count as a substitution
            let substituted = words.iter().zip(&translated).any(|(word, out)| word != out);
            if substituted {
                return translated.join(" ");
            }
        }

        text.to_string()
    }

    /// Every source phrase with its target translations, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TargetTranslations)> {
        self.entries.iter().map(|(phrase, targets)| (phrase.as_str(), targets))
    }

    /// Whether the phrase has an entry for at least one target language
    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains_key(&normalize(phrase))
    }

    /// Every target language code that appears in the table, sorted
    pub fn target_languages(&self) -> Vec<String> {
        self.entries
            .values()
            .flat_map(|targets| targets.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of source phrases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(phrase: &str) -> String {
    phrase.to_lowercase().trim().to_string()
}
