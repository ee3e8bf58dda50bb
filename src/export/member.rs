//! Member enrollment mapper.
//!
//! One-to-one field renaming into the agency's Spanish wire format; dates
//! render as calendar dates, optional address parts as empty strings.

use serde::Serialize;

use crate::models::MemberRegistration;

use super::DATE_FORMAT;

/// One member enrollment entry.
#[derive(Debug, Clone, Serialize)]
pub struct MemberDocument {
    pub id: u64,
    pub nombre: String,
    pub fecha_nacimiento: String,
    pub pais_nacimiento: String,
    pub provincia_nacimiento: String,
    pub localidad_nacimiento: String,
    pub nro_doc: String,
    pub cuit: String,
    pub calle: String,
    pub numero: String,
    pub piso: String,
    pub departamento: String,
    pub pais: String,
    pub provincia: String,
    pub localidad: String,
    pub codigo_postal: String,
    pub telefono: String,
    pub celular: String,
    pub correo: String,
    pub pseudonimo: String,
    pub banda: String,
    pub obra: String,
    pub genero: u32,
}

/// Map one member registration into its enrollment document.
pub fn map_member(member: &MemberRegistration) -> MemberDocument {
    MemberDocument {
        id: member.id,
        nombre: member.name.clone(),
        fecha_nacimiento: member.birth_date.format(DATE_FORMAT).to_string(),
        pais_nacimiento: member.birth_country.clone(),
        provincia_nacimiento: member.birth_state.clone(),
        localidad_nacimiento: member.birth_city.clone(),
        nro_doc: member.doc_number.clone(),
        cuit: member.tax_id.clone(),
        calle: member.street.clone(),
        numero: member.street_number.clone(),
        piso: member.floor.clone().unwrap_or_default(),
        departamento: member.apartment.clone().unwrap_or_default(),
        pais: member.country.clone(),
        provincia: member.state.clone(),
        localidad: member.city.clone(),
        codigo_postal: member.postal_code.clone().unwrap_or_default(),
        telefono: member.landline.clone(),
        celular: member.mobile.clone(),
        correo: member.email.clone(),
        pseudonimo: member.pseudonym.clone(),
        banda: member.band.clone(),
        obra: member.entrance_work.clone(),
        genero: member.genre_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegistrationStatus;

    fn member() -> MemberRegistration {
        MemberRegistration {
            id: 31,
            name: "Rosa Cantor".into(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1985, 11, 30).unwrap(),
            birth_country: "AR".into(),
            birth_state: "Santa Fe".into(),
            birth_city: "Rosario".into(),
            doc_number: "27888999".into(),
            tax_id: "27-27888999-4".into(),
            street: "San Martín".into(),
            street_number: "456".into(),
            floor: Some("2".into()),
            apartment: None,
            country: "AR".into(),
            state: "Santa Fe".into(),
            city: "Rosario".into(),
            postal_code: Some("S2000".into()),
            landline: "341-4001122".into(),
            mobile: "341-155667788".into(),
            email: "rosa@example.com".into(),
            pseudonym: "La Rosa".into(),
            band: "Los Cantores".into(),
            entrance_work: "Zamba del Río".into(),
            genre_id: 12,
            status: RegistrationStatus::AwaitingResponse,
        }
    }

    #[test]
    fn test_member_document_fields() {
        let doc = serde_json::to_value(map_member(&member())).unwrap();

        assert_eq!(doc["nombre"], "Rosa Cantor");
        assert_eq!(doc["fecha_nacimiento"], "1985-11-30");
        assert_eq!(doc["cuit"], "27-27888999-4");
        assert_eq!(doc["piso"], "2");
        // Absent optional address parts render as empty strings.
        assert_eq!(doc["departamento"], "");
        assert_eq!(doc["pseudonimo"], "La Rosa");
        assert_eq!(doc["genero"], 12);
    }
}
