//! Work registration mapper.
//!
//! Transforms a [`WorkRegistration`] and its loaded shares and files into
//! the agency's `addWorks` entry shape. Pure: no store access, no side
//! effects, total over legally persisted registrations.

use serde::Serialize;

use crate::models::{
    Distribution, DistributionHolder, WorkFile, WorkRegistration, AUDIO_FILE_TAG, LYRIC_FILE_TAG,
};

use super::envelope::SUBMITTING_AGENCY;
use super::DATE_FORMAT;

/// `nameNumber` sentinel for a holder without a member registration:
/// "no registered holder id".
pub const UNREGISTERED_HOLDER_ID: &str = "99999999999";

// =============================================================================
// Document Shapes
// =============================================================================

/// One `addWorks` entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDocument {
    pub submission_id: u64,
    pub agency: &'static str,
    pub original_title: String,
    pub other_titles: Vec<String>,
    pub album_title: String,
    pub genre: u32,
    pub duration: u32,
    /// `"S"` / `"N"`.
    pub jingle: &'static str,
    /// `"S"` / `"N"`.
    pub music_movies: &'static str,
    pub unpublished_dnda_number_letter: u32,
    pub unpublished_dnda_number_music: u32,
    /// Calendar date or explicit null; nullability is part of the schema.
    pub unpublished_date: Option<String>,
    pub edited_dnda_number_letter: u32,
    pub edited_dnda_number_music: u32,
    pub edited_date: Option<String>,
    pub interested_parties: Vec<InterestedParty>,
    pub sheet_music_file: FileRef,
    pub audio_file: FileRef,
}

/// A flattened distribution share.
///
/// `name_number` and the three `porcent_*` fields are digit strings here;
/// the numeric-literal rewriter unquotes them in the serialized output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestedParty {
    pub name_number: String,
    pub name: String,
    pub role: String,
    pub porcent_per: String,
    pub porcent_mec: String,
    pub porcent_syn: String,
}

/// A resolved file attachment.
///
/// When the work has no attachment with the matching tag, both fields are
/// absent and the value serializes as an empty object — the schema wants a
/// placeholder, never an omitted key and never null.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

// =============================================================================
// Mapping
// =============================================================================

/// Map one work registration into its submission document.
pub fn map_work(work: &WorkRegistration) -> WorkDocument {
    WorkDocument {
        submission_id: work.id,
        agency: SUBMITTING_AGENCY,
        original_title: work.title.clone(),
        other_titles: work.other_titles.clone(),
        album_title: work.album_title.clone(),
        genre: work.genre_id,
        duration: work.duration,
        jingle: s_n(work.is_jingle),
        music_movies: s_n(work.is_movie),
        unpublished_dnda_number_letter: work.unpublished_number_letter,
        unpublished_dnda_number_music: work.unpublished_number_music,
        unpublished_date: work
            .unpublished_date
            .map(|d| d.format(DATE_FORMAT).to_string()),
        edited_dnda_number_letter: work.edited_number_letter,
        edited_dnda_number_music: work.edited_number_music,
        edited_date: work.edited_date.map(|d| d.format(DATE_FORMAT).to_string()),
        interested_parties: work.distribution.iter().map(map_party).collect(),
        sheet_music_file: file_ref(&work.files, LYRIC_FILE_TAG),
        audio_file: file_ref(&work.files, AUDIO_FILE_TAG),
    }
}

fn map_party(dist: &Distribution) -> InterestedParty {
    let (name_number, name) = match &dist.holder {
        DistributionHolder::Member { profile } => {
            (profile.ip_name.clone(), title_case(&profile.name))
        }
        DistributionHolder::Other { name } => (UNREGISTERED_HOLDER_ID.to_string(), name.clone()),
    };

    InterestedParty {
        name_number,
        name,
        role: dist.role.clone(),
        porcent_per: render_share(dist.performance),
        porcent_mec: render_share(dist.mechanical),
        porcent_syn: render_share(dist.synchronization),
    }
}

/// Render a fractional share in `[0, 1]` as the agency's 5-digit
/// left-zero-padded integer-percent-times-100 string (12.5% -> `01250`).
pub(crate) fn render_share(share: f64) -> String {
    format!("{:05}", (share * 10_000.0).round() as u64)
}

/// Resolve the attachment with the given logical tag into a [`FileRef`],
/// extracting the leaf filename from the stored path.
fn file_ref(files: &[WorkFile], tag: &str) -> FileRef {
    files
        .iter()
        .find(|f| f.name == tag)
        .map(|f| {
            let leaf = f.path.rsplit('/').next().unwrap_or(&f.path);
            FileRef {
                file_name: Some(leaf.to_string()),
                file_path: Some(f.path.clone()),
            }
        })
        .unwrap_or_default()
}

fn s_n(flag: bool) -> &'static str {
    if flag {
        "S"
    } else {
        "N"
    }
}

/// Normalize a stored holder name to title case, one capital per word.
pub(crate) fn title_case(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MemberProfile, RegistrationStatus};

    fn base_work() -> WorkRegistration {
        WorkRegistration {
            id: 42,
            title: "La Canción".into(),
            other_titles: vec!["Subtitle".into()],
            album_title: "El Disco".into(),
            genre_id: 7,
            duration: 215,
            is_jingle: true,
            is_movie: false,
            unpublished_number_letter: 1001,
            unpublished_number_music: 1002,
            unpublished_date: Some(chrono::NaiveDate::from_ymd_opt(2023, 8, 28).unwrap()),
            edited_number_letter: 0,
            edited_number_music: 0,
            edited_date: None,
            status: RegistrationStatus::AwaitingResponse,
            approved: false,
            work_code: None,
            distribution: vec![],
            files: vec![],
        }
    }

    #[test]
    fn test_share_rendering_is_five_digits() {
        assert_eq!(render_share(0.125), "01250");
        assert_eq!(render_share(0.0), "00000");
        assert_eq!(render_share(0.0325), "00325");
        assert_eq!(render_share(1.0), "10000");
        assert_eq!(render_share(0.0001), "00001");
    }

    #[test]
    fn test_member_holder_resolves_profile() {
        let dist = Distribution {
            holder: DistributionHolder::Member {
                profile: MemberProfile {
                    ip_name: "00123456789".into(),
                    name: "MARÍA DEL MAR".into(),
                    member_number: "M-77".into(),
                    email: "maria@example.com".into(),
                },
            },
            performance: 0.5,
            mechanical: 0.5,
            synchronization: 0.0,
            role: "C".into(),
        };

        let party = map_party(&dist);
        assert_eq!(party.name_number, "00123456789");
        assert_eq!(party.name, "María Del Mar");
        assert_eq!(party.role, "C");
    }

    #[test]
    fn test_other_holder_uses_sentinel() {
        let dist = Distribution {
            holder: DistributionHolder::Other {
                name: "Ghost Writer".into(),
            },
            performance: 1.0,
            mechanical: 0.0,
            synchronization: 0.0,
            role: "A".into(),
        };

        let party = map_party(&dist);
        assert_eq!(party.name_number, UNREGISTERED_HOLDER_ID);
        assert_eq!(party.name, "Ghost Writer");
    }

    #[test]
    fn test_missing_audio_file_is_empty_object() {
        let mut work = base_work();
        work.files = vec![WorkFile {
            name: LYRIC_FILE_TAG.into(),
            path: "uploads/works/42/letra.pdf".into(),
        }];

        let doc = map_work(&work);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["sheetMusicFile"]["fileName"], "letra.pdf");
        assert_eq!(
            json["sheetMusicFile"]["filePath"],
            "uploads/works/42/letra.pdf"
        );
        // Placeholder object, not omitted and not null.
        assert_eq!(json["audioFile"], serde_json::json!({}));
    }

    #[test]
    fn test_flags_and_dates() {
        let doc = map_work(&base_work());
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["jingle"], "S");
        assert_eq!(json["musicMovies"], "N");
        assert_eq!(json["unpublishedDate"], "2023-08-28");
        assert_eq!(json["editedDate"], serde_json::Value::Null);
        assert_eq!(json["agency"], "128");
        assert_eq!(json["otherTitles"][0], "Subtitle");
    }
}
