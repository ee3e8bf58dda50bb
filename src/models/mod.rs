//! Domain models for registration records.
//!
//! These are the internal entities the bridge reads (export) and transitions
//! (import):
//!
//! - [`WorkRegistration`] - A musical work submission with its distribution
//!   shares and file attachments
//! - [`JingleRegistration`] - A broadcast-advertisement clearance request
//! - [`MemberRegistration`] - A person enrolling as a rights-holder member
//! - [`RegistrationStatus`] - The lifecycle state shared by all three
//!
//! Conditional field sets (jingle kind, broadcast territory, holder type,
//! tariff payer) are modeled as tagged unions so that illegal field
//! combinations are unrepresentable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Logical name tag for a work's lyric sheet attachment.
pub const LYRIC_FILE_TAG: &str = "lyric_file";

/// Logical name tag for a work's audio attachment.
pub const AUDIO_FILE_TAG: &str = "audio_file";

// =============================================================================
// Registration Lifecycle
// =============================================================================

/// Lifecycle state of a registration.
///
/// The bridge only ever selects [`AwaitingResponse`](Self::AwaitingResponse)
/// records for export, and only ever moves works from `AwaitingResponse`
/// to [`Approved`](Self::Approved) or [`Rejected`](Self::Rejected) on import.
/// Earlier workflow states exist but are never touched here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Being filled in by the registrant.
    Draft,
    /// Under internal review before submission.
    UnderReview,
    /// Submitted to the agency, awaiting its decision. Export-eligible.
    AwaitingResponse,
    /// Terminal: accepted by the agency.
    Approved,
    /// Terminal: rejected by the agency.
    Rejected,
}

// =============================================================================
// Works
// =============================================================================

/// A musical work submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkRegistration {
    /// Internal identifier, echoed to the agency as the submission id.
    pub id: u64,
    pub title: String,
    /// Alternate titles (subtitles), exported as `otherTitles`.
    #[serde(default)]
    pub other_titles: Vec<String>,
    /// Title under which the work was deposited (album title).
    pub album_title: String,
    pub genre_id: u32,
    /// Duration in seconds.
    pub duration: u32,
    pub is_jingle: bool,
    pub is_movie: bool,
    /// DNDA deposit numbers for the unpublished registration (letter, music).
    pub unpublished_number_letter: u32,
    pub unpublished_number_music: u32,
    pub unpublished_date: Option<NaiveDate>,
    /// DNDA deposit numbers for the edited registration (letter, music).
    pub edited_number_letter: u32,
    pub edited_number_music: u32,
    pub edited_date: Option<NaiveDate>,
    pub status: RegistrationStatus,
    pub approved: bool,
    /// Work code assigned by the agency, present only after acceptance.
    pub work_code: Option<String>,
    #[serde(default)]
    pub distribution: Vec<Distribution>,
    #[serde(default)]
    pub files: Vec<WorkFile>,
}

/// A right-holder's share in a work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Distribution {
    pub holder: DistributionHolder,
    /// Performance share as a fraction in `[0, 1]`.
    pub performance: f64,
    /// Mechanical share as a fraction in `[0, 1]`.
    pub mechanical: f64,
    /// Synchronization share as a fraction in `[0, 1]`.
    pub synchronization: f64,
    /// Role code of the holder (composer, author, ...).
    pub role: String,
}

/// Who holds a distribution share.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistributionHolder {
    /// A registered member; name and id resolve from the member profile.
    Member { profile: MemberProfile },
    /// A party without a member registration; only an inline name is known.
    Other { name: String },
}

/// Profile of a registered member linked from a share or an agreement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Registered interested-party name number, a digit string that may
    /// carry leading zeros.
    pub ip_name: String,
    pub name: String,
    /// Internal member number.
    pub member_number: String,
    pub email: String,
}

/// A file attached to a work, matched by logical name tag, not position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkFile {
    /// Logical tag: [`LYRIC_FILE_TAG`] or [`AUDIO_FILE_TAG`].
    pub name: String,
    /// Stored path; the export keeps the path and extracts the leaf filename.
    pub path: String,
}

// =============================================================================
// Jingles
// =============================================================================

/// A broadcast-advertisement clearance request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JingleRegistration {
    pub id: u64,
    pub kind: JingleKind,
    pub request_action: String,
    /// Validity period of the clearance.
    pub validity: String,
    pub air_date: NaiveDate,
    pub territory: BroadcastTerritory,
    pub applicant: ContactBlock,
    pub advertiser: ContactBlock,
    pub agency_type: String,
    pub agency: ContactBlock,
    pub media: MediaPair,
    pub product: ProductBlock,
    /// The underlying musical work being advertised with.
    pub source_work: SourceWorkBlock,
    /// `Some` iff the authors consented; carries one entry per author.
    pub consent: Option<Vec<Agreement>>,
    pub tariff: TariffBlock,
    pub status: RegistrationStatus,
}

/// Special requests carry a list of ad durations, regular ones a single value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JingleKind {
    Special { ad_durations: Vec<u32> },
    Regular { ad_duration: u32 },
}

/// Where the advertisement will air. Territory-dependent fields live on the
/// variant that needs them, so `provinces` and `countries` cannot coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum BroadcastTerritory {
    National,
    Provincial { provinces: Vec<String> },
    International {
        countries: Vec<String>,
        /// Whether the campaign also airs nationwide.
        also_national: bool,
    },
}

impl BroadcastTerritory {
    /// External label used in the jingle document.
    pub fn label(&self) -> &'static str {
        match self {
            BroadcastTerritory::National => "nacional",
            BroadcastTerritory::Provincial { .. } => "provincial",
            BroadcastTerritory::International { .. } => "internacional",
        }
    }
}

/// Contact data for the applicant, advertiser or agency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactBlock {
    /// Tax identifier (CUIT).
    pub tax_id: String,
    pub legal_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Primary/secondary communication media pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaPair {
    pub primary: String,
    pub secondary: String,
}

/// The advertised product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductBlock {
    pub brand: String,
    pub kind: String,
    pub name: String,
}

/// Description of the musical work underlying the jingle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceWorkBlock {
    pub title: String,
    pub original: bool,
    pub dnda: Option<String>,
    pub authors: Option<String>,
    pub composers: Option<String>,
    pub editors: Option<String>,
    pub lyrics_modified: bool,
    pub music_modified: bool,
}

/// An author's consent to the jingle use of their work.
///
/// Members export a subset of fields resolved from their profile; external
/// authors carry the full personal-data record inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Agreement {
    Member {
        profile: MemberProfile,
        doc_number: String,
    },
    External { person: ExternalAuthor },
}

/// Full personal-data record for an author without a member registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalAuthor {
    pub name: String,
    pub doc_number: String,
    pub email: String,
    pub country: String,
    pub nationality: String,
    pub state: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub street_name: String,
    pub street_number: String,
    pub floor: Option<String>,
    pub apartment: Option<String>,
    pub birth_date: NaiveDate,
    pub phone_country: String,
    pub phone_area: String,
    pub phone_number: String,
}

/// Tariff owed for the clearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffBlock {
    pub amount: f64,
    pub payer: TariffPayer,
}

/// Who pays the tariff. Only a representation carries the on-account party.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "payer", rename_all = "snake_case")]
pub enum TariffPayer {
    Applicant,
    Advertiser,
    Representation { on_account_of: String },
}

impl TariffPayer {
    /// External label used in the jingle document.
    pub fn label(&self) -> &'static str {
        match self {
            TariffPayer::Applicant => "solicitante",
            TariffPayer::Advertiser => "anunciante",
            TariffPayer::Representation { .. } => "representada",
        }
    }
}

// =============================================================================
// Members
// =============================================================================

/// A person enrolling as a rights-holder member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRegistration {
    pub id: u64,
    pub name: String,
    pub birth_date: NaiveDate,
    pub birth_country: String,
    pub birth_state: String,
    pub birth_city: String,
    pub doc_number: String,
    /// Tax identifier (CUIT).
    pub tax_id: String,
    pub street: String,
    pub street_number: String,
    pub floor: Option<String>,
    pub apartment: Option<String>,
    pub country: String,
    pub state: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub landline: String,
    pub mobile: String,
    pub email: String,
    pub pseudonym: String,
    pub band: String,
    /// The qualifying work used for entrance.
    pub entrance_work: String,
    pub genre_id: u32,
    pub status: RegistrationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_roundtrip() {
        let json = serde_json::to_string(&RegistrationStatus::AwaitingResponse).unwrap();
        assert_eq!(json, "\"awaiting_response\"");
        let back: RegistrationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RegistrationStatus::AwaitingResponse);
    }

    #[test]
    fn test_territory_labels() {
        assert_eq!(BroadcastTerritory::National.label(), "nacional");
        assert_eq!(
            BroadcastTerritory::Provincial { provinces: vec![] }.label(),
            "provincial"
        );
        assert_eq!(
            BroadcastTerritory::International {
                countries: vec![],
                also_national: false
            }
            .label(),
            "internacional"
        );
    }

    #[test]
    fn test_holder_tagged_serialization() {
        let holder = DistributionHolder::Other {
            name: "J. Composer".into(),
        };
        let json = serde_json::to_value(&holder).unwrap();
        assert_eq!(json["type"], "other");
        assert_eq!(json["name"], "J. Composer");
    }
}
