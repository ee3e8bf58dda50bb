//! Jingle clearance mapper.
//!
//! Transforms a [`JingleRegistration`] into the agency's inclusion entry.
//! The external field names are the agency's Spanish wire format and are
//! fixed. Conditional sections (ad breakdown, territory extras, tariff
//! on-account, author shapes) are untagged enums flattened into the
//! document, so each variant only ever emits the fields valid for it.

use serde::Serialize;

use crate::models::{
    Agreement, BroadcastTerritory, ContactBlock, JingleKind, JingleRegistration, SourceWorkBlock,
    TariffPayer,
};

use super::work::title_case;
use super::DATE_FORMAT;

// =============================================================================
// Document Shapes
// =============================================================================

/// One jingle inclusion entry.
#[derive(Debug, Clone, Serialize)]
pub struct JingleDocument {
    pub id: u64,
    pub tipo_solicitud: &'static str,
    pub tipo_accion: String,
    pub vigencia: String,
    pub fecha_salida: String,
    pub territorio: &'static str,
    pub solicitante: ContactDocument,
    pub anunciante: ContactDocument,
    #[serde(flatten)]
    pub avisos: AdBreakdown,
    #[serde(flatten)]
    pub alcance: TerritoryFields,
    pub medios_de_comunicacion: MediaDocument,
    pub agencia: AgencyDocument,
    pub producto: ProductDocument,
    pub obra: SourceWorkDocument,
    pub conformidad_autores: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autores: Option<Vec<AuthorDocument>>,
    pub arancel_monto: f64,
    pub arancel_responsable: &'static str,
    #[serde(flatten)]
    pub arancel: TariffFields,
}

/// Special requests list every ad duration with a count; regular requests
/// carry a single duration.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AdBreakdown {
    Special {
        cantidad_avisos: usize,
        duracion_avisos: Vec<u32>,
    },
    Regular {
        duracion_aviso: u32,
    },
}

/// Territory-dependent extras: provinces for provincial campaigns, country
/// list plus nationwide flag for international ones, nothing for national.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TerritoryFields {
    National {},
    Provincial {
        provincias: Vec<String>,
    },
    International {
        paises: Vec<String>,
        difusion_nacional: bool,
    },
}

/// On-account party, present only when a representation pays the tariff.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TariffFields {
    Direct {},
    OnAccount { arancel_a_cuenta: String },
}

/// Applicant or advertiser contact block.
#[derive(Debug, Clone, Serialize)]
pub struct ContactDocument {
    pub cuit: String,
    pub razon_social: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
}

/// Agency contact block; same as [`ContactDocument`] plus the agency type.
#[derive(Debug, Clone, Serialize)]
pub struct AgencyDocument {
    pub tipo: String,
    pub cuit: String,
    pub razon_social: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaDocument {
    pub tipo_1: String,
    pub tipo_2: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDocument {
    pub marca: String,
    pub tipo: String,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceWorkDocument {
    pub titulo: String,
    pub original: &'static str,
    pub dnda: String,
    pub autores: String,
    pub compositores: String,
    pub editores: String,
    pub letra_modificada: &'static str,
    pub musica_modificada: &'static str,
}

/// A consenting author. Members export a profile subset; external authors
/// export the full personal-data record.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AuthorDocument {
    Member {
        nombre: String,
        nro_socio: String,
        nro_doc: String,
        correo: String,
    },
    External {
        nombre: String,
        nro_doc: String,
        correo: String,
        pais: String,
        nacionalidad: String,
        provincia: String,
        localidad: String,
        codigo_postal: String,
        calle: String,
        numero: String,
        piso: String,
        departamento: String,
        fecha_nacimiento: String,
        tel_pais: String,
        tel_area: String,
        tel_num: String,
    },
}

// =============================================================================
// Mapping
// =============================================================================

/// Map one jingle registration into its inclusion document.
pub fn map_jingle(jingle: &JingleRegistration) -> JingleDocument {
    let avisos = match &jingle.kind {
        JingleKind::Special { ad_durations } => AdBreakdown::Special {
            cantidad_avisos: ad_durations.len(),
            duracion_avisos: ad_durations.clone(),
        },
        JingleKind::Regular { ad_duration } => AdBreakdown::Regular {
            duracion_aviso: *ad_duration,
        },
    };

    let alcance = match &jingle.territory {
        BroadcastTerritory::National => TerritoryFields::National {},
        BroadcastTerritory::Provincial { provinces } => TerritoryFields::Provincial {
            provincias: provinces.clone(),
        },
        BroadcastTerritory::International {
            countries,
            also_national,
        } => TerritoryFields::International {
            paises: countries.clone(),
            difusion_nacional: *also_national,
        },
    };

    let arancel = match &jingle.tariff.payer {
        TariffPayer::Representation { on_account_of } => TariffFields::OnAccount {
            arancel_a_cuenta: on_account_of.clone(),
        },
        _ => TariffFields::Direct {},
    };

    JingleDocument {
        id: jingle.id,
        tipo_solicitud: match jingle.kind {
            JingleKind::Special { .. } => "especial",
            JingleKind::Regular { .. } => "regular",
        },
        tipo_accion: jingle.request_action.clone(),
        vigencia: jingle.validity.clone(),
        fecha_salida: jingle.air_date.format(DATE_FORMAT).to_string(),
        territorio: jingle.territory.label(),
        solicitante: map_contact(&jingle.applicant),
        anunciante: map_contact(&jingle.advertiser),
        avisos,
        alcance,
        medios_de_comunicacion: MediaDocument {
            tipo_1: jingle.media.primary.clone(),
            tipo_2: jingle.media.secondary.clone(),
        },
        agencia: map_agency(&jingle.agency_type, &jingle.agency),
        producto: ProductDocument {
            marca: jingle.product.brand.clone(),
            tipo: jingle.product.kind.clone(),
            nombre: jingle.product.name.clone(),
        },
        obra: map_source_work(&jingle.source_work),
        conformidad_autores: si_no(jingle.consent.is_some()),
        autores: jingle
            .consent
            .as_ref()
            .map(|agreements| agreements.iter().map(map_author).collect()),
        arancel_monto: jingle.tariff.amount,
        arancel_responsable: jingle.tariff.payer.label(),
        arancel,
    }
}

fn map_contact(contact: &ContactBlock) -> ContactDocument {
    ContactDocument {
        cuit: contact.tax_id.clone(),
        razon_social: contact.legal_name.clone(),
        direccion: trimmed(&contact.address),
        telefono: trimmed(&contact.phone),
        correo: trimmed(&contact.email),
    }
}

fn map_agency(agency_type: &str, contact: &ContactBlock) -> AgencyDocument {
    let c = map_contact(contact);
    AgencyDocument {
        tipo: agency_type.to_string(),
        cuit: c.cuit,
        razon_social: c.razon_social,
        direccion: c.direccion,
        telefono: c.telefono,
        correo: c.correo,
    }
}

fn map_source_work(work: &SourceWorkBlock) -> SourceWorkDocument {
    SourceWorkDocument {
        titulo: work.title.clone(),
        original: si_no(work.original),
        dnda: work.dnda.clone().unwrap_or_default(),
        autores: work.authors.clone().unwrap_or_default(),
        compositores: work.composers.clone().unwrap_or_default(),
        editores: work.editors.clone().unwrap_or_default(),
        letra_modificada: si_no(work.lyrics_modified),
        musica_modificada: si_no(work.music_modified),
    }
}

fn map_author(agreement: &Agreement) -> AuthorDocument {
    match agreement {
        Agreement::Member {
            profile,
            doc_number,
        } => AuthorDocument::Member {
            nombre: title_case(&profile.name),
            nro_socio: profile.member_number.clone(),
            nro_doc: doc_number.clone(),
            correo: profile.email.clone(),
        },
        Agreement::External { person } => AuthorDocument::External {
            nombre: person.name.clone(),
            nro_doc: person.doc_number.clone(),
            correo: person.email.clone(),
            pais: person.country.clone(),
            nacionalidad: person.nationality.clone(),
            provincia: person.state.clone(),
            localidad: person.city.clone(),
            codigo_postal: person.postal_code.clone().unwrap_or_default(),
            calle: person.street_name.clone(),
            numero: person.street_number.clone(),
            piso: person.floor.clone().unwrap_or_default(),
            departamento: person.apartment.clone().unwrap_or_default(),
            fecha_nacimiento: person.birth_date.format(DATE_FORMAT).to_string(),
            tel_pais: person.phone_country.clone(),
            tel_area: person.phone_area.clone(),
            tel_num: person.phone_number.clone(),
        },
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn si_no(flag: bool) -> &'static str {
    if flag {
        "Si"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BroadcastTerritory, MediaPair, MemberProfile, ProductBlock, RegistrationStatus,
        TariffBlock,
    };

    fn contact() -> ContactBlock {
        ContactBlock {
            tax_id: "30-12345678-9".into(),
            legal_name: "Acme SRL".into(),
            address: Some("  Av. Siempre Viva 742  ".into()),
            phone: None,
            email: Some("legal@acme.example ".into()),
        }
    }

    fn base_jingle() -> JingleRegistration {
        JingleRegistration {
            id: 9,
            kind: JingleKind::Regular { ad_duration: 20 },
            request_action: "inclusion".into(),
            validity: "6 meses".into(),
            air_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            territory: BroadcastTerritory::National,
            applicant: contact(),
            advertiser: contact(),
            agency_type: "directa".into(),
            agency: contact(),
            media: MediaPair {
                primary: "TV".into(),
                secondary: "Cable".into(),
            },
            product: ProductBlock {
                brand: "Acme".into(),
                kind: "gaseosa".into(),
                name: "Acme Cola".into(),
            },
            source_work: SourceWorkBlock {
                title: "La Canción".into(),
                original: true,
                dnda: None,
                authors: Some("A. Autor".into()),
                composers: None,
                editors: None,
                lyrics_modified: false,
                music_modified: true,
            },
            consent: None,
            tariff: TariffBlock {
                amount: 1500.0,
                payer: TariffPayer::Advertiser,
            },
            status: RegistrationStatus::AwaitingResponse,
        }
    }

    #[test]
    fn test_regular_vs_special_breakdown() {
        let regular = serde_json::to_value(map_jingle(&base_jingle())).unwrap();
        assert_eq!(regular["tipo_solicitud"], "regular");
        assert_eq!(regular["duracion_aviso"], 20);
        assert!(regular.get("cantidad_avisos").is_none());
        assert!(regular.get("duracion_avisos").is_none());

        let mut special = base_jingle();
        special.kind = JingleKind::Special {
            ad_durations: vec![10, 20, 30],
        };
        let special = serde_json::to_value(map_jingle(&special)).unwrap();
        assert_eq!(special["tipo_solicitud"], "especial");
        assert_eq!(special["cantidad_avisos"], 3);
        assert_eq!(special["duracion_avisos"], serde_json::json!([10, 20, 30]));
        assert!(special.get("duracion_aviso").is_none());
    }

    #[test]
    fn test_territory_fields_are_exclusive() {
        let national = serde_json::to_value(map_jingle(&base_jingle())).unwrap();
        assert_eq!(national["territorio"], "nacional");
        assert!(national.get("provincias").is_none());
        assert!(national.get("paises").is_none());

        let mut provincial = base_jingle();
        provincial.territory = BroadcastTerritory::Provincial {
            provinces: vec!["Córdoba".into(), "Mendoza".into()],
        };
        let provincial = serde_json::to_value(map_jingle(&provincial)).unwrap();
        assert_eq!(
            provincial["provincias"],
            serde_json::json!(["Córdoba", "Mendoza"])
        );
        assert!(provincial.get("paises").is_none());

        let mut international = base_jingle();
        international.territory = BroadcastTerritory::International {
            countries: vec!["UY".into(), "CL".into()],
            also_national: true,
        };
        let international = serde_json::to_value(map_jingle(&international)).unwrap();
        assert_eq!(international["paises"], serde_json::json!(["UY", "CL"]));
        assert_eq!(international["difusion_nacional"], true);
        assert!(international.get("provincias").is_none());
    }

    #[test]
    fn test_contact_trimming() {
        let doc = serde_json::to_value(map_jingle(&base_jingle())).unwrap();
        assert_eq!(doc["solicitante"]["direccion"], "Av. Siempre Viva 742");
        assert_eq!(doc["solicitante"]["telefono"], "");
        assert_eq!(doc["solicitante"]["correo"], "legal@acme.example");
    }

    #[test]
    fn test_author_shapes() {
        let mut jingle = base_jingle();
        jingle.consent = Some(vec![
            Agreement::Member {
                profile: MemberProfile {
                    ip_name: "00000000001".into(),
                    name: "JUAN PÉREZ".into(),
                    member_number: "S-1234".into(),
                    email: "juan@example.com".into(),
                },
                doc_number: "30111222".into(),
            },
            Agreement::External {
                person: crate::models::ExternalAuthor {
                    name: "Ada External".into(),
                    doc_number: "28999888".into(),
                    email: "ada@example.com".into(),
                    country: "AR".into(),
                    nationality: "Argentina".into(),
                    state: "Buenos Aires".into(),
                    city: "La Plata".into(),
                    postal_code: None,
                    street_name: "Calle 7".into(),
                    street_number: "123".into(),
                    floor: None,
                    apartment: None,
                    birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
                    phone_country: "54".into(),
                    phone_area: "221".into(),
                    phone_number: "5551234".into(),
                },
            },
        ]);

        let doc = serde_json::to_value(map_jingle(&jingle)).unwrap();
        assert_eq!(doc["conformidad_autores"], "Si");

        let member = &doc["autores"][0];
        assert_eq!(member["nombre"], "Juan Pérez");
        assert_eq!(member["nro_socio"], "S-1234");
        assert!(member.get("fecha_nacimiento").is_none());

        let external = &doc["autores"][1];
        assert_eq!(external["fecha_nacimiento"], "1990-01-15");
        assert_eq!(external["codigo_postal"], "");
        assert!(external.get("nro_socio").is_none());
    }

    #[test]
    fn test_tariff_on_account() {
        let direct = serde_json::to_value(map_jingle(&base_jingle())).unwrap();
        assert_eq!(direct["arancel_responsable"], "anunciante");
        assert!(direct.get("arancel_a_cuenta").is_none());

        let mut represented = base_jingle();
        represented.tariff.payer = TariffPayer::Representation {
            on_account_of: "Editorial Sur".into(),
        };
        let represented = serde_json::to_value(map_jingle(&represented)).unwrap();
        assert_eq!(represented["arancel_responsable"], "representada");
        assert_eq!(represented["arancel_a_cuenta"], "Editorial Sur");
    }
}
