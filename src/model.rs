use crate::{
    countdown,
    error::{UnveilError, UnveilResult},
    layout::Placement,
    reveal::RevealDisplay,
    tour::GuideStep,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Ja,
    My,
}

impl Language {
    pub const ALL: [Self; 3] = [Self::En, Self::Ja, Self::My];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
            Self::My => "my",
        }
    }
}

/// A piece of text carried in every supported language. Lookups fall back to
/// English when a translation is missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LocalizedString {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub ja: String,
    #[serde(default)]
    pub my: String,
}

impl LocalizedString {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, lang: Language, text: impl Into<String>) -> Self {
        match lang {
            Language::En => self.en = text.into(),
            Language::Ja => self.ja = text.into(),
            Language::My => self.my = text.into(),
        }
        self
    }

    pub fn get(&self, lang: Language) -> &str {
        let text = match lang {
            Language::En => &self.en,
            Language::Ja => &self.ja,
            Language::My => &self.my,
        };
        if text.is_empty() { &self.en } else { text }
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.ja.is_empty() && self.my.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleIcon {
    #[default]
    Ceremony,
    Reception,
    Party,
    Photo,
    Meal,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleItem {
    /// Wall-clock time of day, `HH:MM`.
    pub time: String,
    pub title: LocalizedString,
    pub icon: ScheduleIcon,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqItem {
    pub question: LocalizedString,
    pub answer: LocalizedString,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub name: LocalizedString,
    pub address: LocalizedString,
    pub map_url: String,
}

/// Page color scheme, hex `#RRGGBB` throughout.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub name: String,
    pub primary: String,
    pub text: String,
    pub background: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Classic Gold".to_string(),
            primary: "#C5A059".to_string(),
            text: "#4A4A4A".to_string(),
            background: "#F5F0E6".to_string(),
        }
    }
}

impl Theme {
    pub fn presets() -> Vec<Self> {
        fn preset(name: &str, primary: &str, text: &str, background: &str) -> Theme {
            Theme {
                name: name.to_string(),
                primary: primary.to_string(),
                text: text.to_string(),
                background: background.to_string(),
            }
        }

        vec![
            preset("Classic Gold", "#C5A059", "#4A4A4A", "#F5F0E6"),
            preset("Sakura Pink", "#D48695", "#5D4037", "#FCE4EC"),
            preset("Forest Green", "#5D7052", "#2C3E26", "#EDF2EB"),
            preset("Ocean Blue", "#6B8E9B", "#2B3A42", "#EFF5F7"),
        ]
    }
}

/// Feature toggles for the decorative page layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visuals {
    pub falling_petals: bool,
    pub ambient_audio: bool,
    pub photo_gallery: bool,
    pub onboarding_guide: bool,
}

impl Default for Visuals {
    fn default() -> Self {
        Self {
            falling_petals: true,
            ambient_audio: true,
            photo_gallery: true,
            onboarding_guide: true,
        }
    }
}

/// A guide step as stored: localized text plus the anchor it points at.
/// Resolved per language into the tour's [`GuideStep`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuideStepText {
    pub anchor_id: String,
    pub title: LocalizedString,
    pub message: LocalizedString,
    pub placement: Placement,
}

/// The whole admin-configurable invitation document.
///
/// The JSON form is camelCase, compatible with the documents the admin panel
/// produces and re-imports.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeddingData {
    pub groom_name: LocalizedString,
    pub bride_name: LocalizedString,
    /// Event timestamp, RFC 3339 or the datetime-local forms the admin UI
    /// emits. Renderers treat an unparseable value as blank; `validate`
    /// rejects it.
    pub date: String,
    pub greeting: LocalizedString,
    pub schedule: Vec<ScheduleItem>,
    pub faqs: Vec<FaqItem>,
    pub location: Location,
    pub theme: Theme,
    pub visuals: Visuals,
    pub guide_steps: Vec<GuideStepText>,
}

/// The closed set of edits the admin surface may apply.
///
/// List edits are index-addressed and bounds-checked; a bad index is a
/// validation error, not a silent no-op.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataUpdate {
    GroomName(LocalizedString),
    BrideName(LocalizedString),
    Date(String),
    Greeting(LocalizedString),
    Theme(Theme),
    Visuals(Visuals),
    Location(Location),
    AddScheduleItem(ScheduleItem),
    ReplaceScheduleItem { index: usize, item: ScheduleItem },
    RemoveScheduleItem { index: usize },
    AddFaq(FaqItem),
    RemoveFaq { index: usize },
}

impl WeddingData {
    /// A filled-in document suitable for demos and as an editing starting
    /// point.
    pub fn sample() -> Self {
        Self {
            groom_name: LocalizedString::new("Kenji").with(Language::Ja, "健二"),
            bride_name: LocalizedString::new("Mio").with(Language::Ja, "美緒"),
            date: "2026-10-10T11:00".to_string(),
            greeting: LocalizedString::new("We joyfully invite you to celebrate with us.")
                .with(Language::Ja, "私たちの結婚式にぜひお越しください。"),
            schedule: vec![
                ScheduleItem {
                    time: "11:00".to_string(),
                    title: LocalizedString::new("Ceremony").with(Language::Ja, "挙式"),
                    icon: ScheduleIcon::Ceremony,
                },
                ScheduleItem {
                    time: "12:30".to_string(),
                    title: LocalizedString::new("Reception").with(Language::Ja, "披露宴"),
                    icon: ScheduleIcon::Reception,
                },
            ],
            faqs: vec![FaqItem {
                question: LocalizedString::new("Is there a dress code?"),
                answer: LocalizedString::new("Semi-formal; garden shoes recommended."),
            }],
            location: Location {
                name: LocalizedString::new("Riverside Garden Hall"),
                address: LocalizedString::new("1-2-3 Riverside, Nakameguro, Tokyo"),
                map_url: "https://maps.example.com/riverside-garden".to_string(),
            },
            theme: Theme::default(),
            visuals: Visuals::default(),
            guide_steps: vec![
                GuideStepText {
                    anchor_id: "lang-switch".to_string(),
                    title: LocalizedString::new("Select Language").with(Language::Ja, "言語を選択"),
                    message: LocalizedString::new("Change the page language here.")
                        .with(Language::Ja, "言語はこちらで変更できます。"),
                    placement: Placement::Bottom,
                },
                GuideStepText {
                    anchor_id: "mobile-nav".to_string(),
                    title: LocalizedString::new("Navigation"),
                    message: LocalizedString::new(
                        "Use these tabs to view the Schedule, Access, and RSVP.",
                    ),
                    placement: Placement::Top,
                },
            ],
        }
    }

    /// The card-face payload for the reveal overlay, resolved in `lang`.
    pub fn reveal_display(&self, lang: Language) -> RevealDisplay {
        RevealDisplay {
            primary_name: self.groom_name.get(lang).to_string(),
            secondary_name: self.bride_name.get(lang).to_string(),
            event_date: self.date.clone(),
        }
    }

    /// Guide steps resolved in `lang`, ready for [`crate::tour::GuideTour`].
    pub fn resolve_guide(&self, lang: Language) -> Vec<GuideStep> {
        self.guide_steps
            .iter()
            .map(|step| GuideStep {
                anchor_id: step.anchor_id.clone(),
                title: step.title.get(lang).to_string(),
                message: step.message.get(lang).to_string(),
                placement: step.placement,
            })
            .collect()
    }

    /// Parses a document from its JSON export form.
    pub fn from_json(json: &str) -> UnveilResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| UnveilError::serde(format!("invitation document: {e}")))
    }

    /// The JSON export form the admin surface downloads.
    pub fn to_json_pretty(&self) -> UnveilResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| UnveilError::serde(e.to_string()))
    }

    pub fn apply(&mut self, update: DataUpdate) -> UnveilResult<()> {
        match update {
            DataUpdate::GroomName(v) => self.groom_name = v,
            DataUpdate::BrideName(v) => self.bride_name = v,
            DataUpdate::Date(v) => self.date = v,
            DataUpdate::Greeting(v) => self.greeting = v,
            DataUpdate::Theme(v) => self.theme = v,
            DataUpdate::Visuals(v) => self.visuals = v,
            DataUpdate::Location(v) => self.location = v,
            DataUpdate::AddScheduleItem(item) => self.schedule.push(item),
            DataUpdate::ReplaceScheduleItem { index, item } => {
                let slot = self.schedule.get_mut(index).ok_or_else(|| {
                    UnveilError::validation(format!("schedule index {index} out of range"))
                })?;
                *slot = item;
            }
            DataUpdate::RemoveScheduleItem { index } => {
                if index >= self.schedule.len() {
                    return Err(UnveilError::validation(format!(
                        "schedule index {index} out of range"
                    )));
                }
                self.schedule.remove(index);
            }
            DataUpdate::AddFaq(item) => self.faqs.push(item),
            DataUpdate::RemoveFaq { index } => {
                if index >= self.faqs.len() {
                    return Err(UnveilError::validation(format!(
                        "faq index {index} out of range"
                    )));
                }
                self.faqs.remove(index);
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> UnveilResult<()> {
        if self.groom_name.en.is_empty() {
            return Err(UnveilError::validation("groom name (en) must not be empty"));
        }
        if self.bride_name.en.is_empty() {
            return Err(UnveilError::validation("bride name (en) must not be empty"));
        }

        if !self.date.is_empty() && countdown::parse_event_date(&self.date).is_none() {
            return Err(UnveilError::validation(format!(
                "date '{}' is not a recognized timestamp",
                self.date
            )));
        }

        for (i, item) in self.schedule.iter().enumerate() {
            if !is_hhmm(&item.time) {
                return Err(UnveilError::validation(format!(
                    "schedule item {i} time '{}' is not HH:MM",
                    item.time
                )));
            }
            if item.title.is_empty() {
                return Err(UnveilError::validation(format!(
                    "schedule item {i} has no title"
                )));
            }
        }

        for color in [
            self.theme.primary.as_str(),
            self.theme.text.as_str(),
            self.theme.background.as_str(),
        ] {
            if !is_hex_color(color) {
                return Err(UnveilError::validation(format!(
                    "theme color '{color}' is not #RRGGBB"
                )));
            }
        }

        if !self.location.map_url.is_empty()
            && !(self.location.map_url.starts_with("http://")
                || self.location.map_url.starts_with("https://"))
        {
            return Err(UnveilError::validation("map url must be http(s)"));
        }

        for (i, step) in self.guide_steps.iter().enumerate() {
            if step.anchor_id.is_empty() {
                return Err(UnveilError::validation(format!(
                    "guide step {i} has an empty anchor id"
                )));
            }
        }

        Ok(())
    }
}

fn is_hhmm(s: &str) -> bool {
    let Some((h, m)) = s.split_once(':') else {
        return false;
    };
    let two_digits = |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(h) || !two_digits(m) {
        return false;
    }
    let (Ok(h), Ok(m)) = (h.parse::<u8>(), m.parse::<u8>()) else {
        return false;
    };
    h < 24 && m < 60
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_validates() {
        WeddingData::sample().validate().unwrap();
    }

    #[test]
    fn localized_lookup_falls_back_to_english() {
        let s = LocalizedString::new("Hello").with(Language::Ja, "こんにちは");
        assert_eq!(s.get(Language::Ja), "こんにちは");
        assert_eq!(s.get(Language::My), "Hello");
    }

    #[test]
    fn json_keys_are_camel_case() {
        let json = serde_json::to_string(&WeddingData::sample()).unwrap();
        assert!(json.contains("\"groomName\""));
        assert!(json.contains("\"brideName\""));
        assert!(json.contains("\"mapUrl\""));
        assert!(json.contains("\"guideSteps\""));
        assert!(json.contains("\"anchorId\""));
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let data = WeddingData::sample();
        let json = data.to_json_pretty().unwrap();
        let back = WeddingData::from_json(&json).unwrap();
        assert_eq!(data, back);
    }

    #[test]
    fn from_json_reports_serde_errors() {
        let err = WeddingData::from_json("{ not json").unwrap_err();
        assert!(err.to_string().contains("serialization error:"));
    }

    #[test]
    fn partial_document_fills_defaults() {
        let data: WeddingData =
            serde_json::from_str(r#"{"groomName": {"en": "A"}, "brideName": {"en": "B"}}"#).unwrap();
        assert_eq!(data.groom_name.en, "A");
        assert_eq!(data.theme, Theme::default());
        assert!(data.visuals.onboarding_guide);
    }

    #[test]
    fn apply_replaces_and_rejects_out_of_range() {
        let mut data = WeddingData::sample();
        let item = ScheduleItem {
            time: "15:00".to_string(),
            title: LocalizedString::new("Party"),
            icon: ScheduleIcon::Party,
        };

        data.apply(DataUpdate::ReplaceScheduleItem {
            index: 1,
            item: item.clone(),
        })
        .unwrap();
        assert_eq!(data.schedule[1], item);

        let err = data
            .apply(DataUpdate::RemoveScheduleItem { index: 99 })
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn validate_rejects_malformed_fields() {
        let mut data = WeddingData::sample();
        data.schedule[0].time = "9:00".to_string();
        assert!(data.validate().is_err());

        let mut data = WeddingData::sample();
        data.theme.primary = "C5A059".to_string();
        assert!(data.validate().is_err());

        let mut data = WeddingData::sample();
        data.date = "next summer".to_string();
        assert!(data.validate().is_err());

        let mut data = WeddingData::sample();
        data.location.map_url = "ftp://example.com".to_string();
        assert!(data.validate().is_err());
    }

    #[test]
    fn resolve_guide_uses_language_with_fallback() {
        let data = WeddingData::sample();
        let ja = data.resolve_guide(Language::Ja);
        assert_eq!(ja[0].title, "言語を選択");
        // Second step has no Japanese translation; falls back to English.
        assert_eq!(ja[1].title, "Navigation");
    }
}
