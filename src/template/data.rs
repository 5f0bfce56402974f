use crate::number::derive_certificate_number;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Die beiden Personen auf dem Zertifikat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    First,
    Second,
}

/// Alle vom Benutzer editierbaren Felder.
///
/// Die Zertifikatsnummer fehlt absichtlich: sie wird nur aus den Namen
/// abgeleitet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    HusbandName,
    WifeName,
    HusbandGender,
    WifeGender,
    HusbandRegistrationPlace,
    WifeRegistrationPlace,
    HusbandBirthDate,
    WifeBirthDate,
    RegistrationDate,
    Registrar,
    HusbandIdNumber,
    WifeIdNumber,
    HusbandIdUrl,
    WifeIdUrl,
}

impl RecordField {
    pub const ALL: [RecordField; 14] = [
        RecordField::HusbandName,
        RecordField::WifeName,
        RecordField::HusbandGender,
        RecordField::WifeGender,
        RecordField::HusbandRegistrationPlace,
        RecordField::WifeRegistrationPlace,
        RecordField::HusbandBirthDate,
        RecordField::WifeBirthDate,
        RecordField::RegistrationDate,
        RecordField::Registrar,
        RecordField::HusbandIdNumber,
        RecordField::WifeIdNumber,
        RecordField::HusbandIdUrl,
        RecordField::WifeIdUrl,
    ];

    /// JSON-Schlüssel (wie die Formularfelder)
    pub fn key(self) -> &'static str {
        match self {
            RecordField::HusbandName => "husbandName",
            RecordField::WifeName => "wifeName",
            RecordField::HusbandGender => "husbandGender",
            RecordField::WifeGender => "wifeGender",
            RecordField::HusbandRegistrationPlace => "husbandRegistrationPlace",
            RecordField::WifeRegistrationPlace => "wifeRegistrationPlace",
            RecordField::HusbandBirthDate => "husbandBirthDate",
            RecordField::WifeBirthDate => "wifeBirthDate",
            RecordField::RegistrationDate => "registrationDate",
            RecordField::Registrar => "registrar",
            RecordField::HusbandIdNumber => "husbandIdNumber",
            RecordField::WifeIdNumber => "wifeIdNumber",
            RecordField::HusbandIdUrl => "husbandIdUrl",
            RecordField::WifeIdUrl => "wifeIdUrl",
        }
    }

    pub fn is_name(self) -> bool {
        matches!(self, RecordField::HusbandName | RecordField::WifeName)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field `{}`", s))
    }
}

/// Daten für das Zertifikat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateRecord {
    husband_name: String,
    wife_name: String,
    husband_gender: String,
    wife_gender: String,
    husband_registration_place: String,
    wife_registration_place: String,
    husband_birth_date: String,
    wife_birth_date: String,
    registration_date: String,
    registrar: String,
    husband_id_number: String,
    wife_id_number: String,
    husband_id_url: String,
    wife_id_url: String,

    /// Abgeleitet, nur über die Namen änderbar
    certificate_number: String,
}

impl Default for CertificateRecord {
    fn default() -> Self {
        Self {
            husband_name: String::new(),
            wife_name: String::new(),
            husband_gender: "男".to_string(),
            wife_gender: "女".to_string(),
            husband_registration_place: String::new(),
            wife_registration_place: String::new(),
            husband_birth_date: String::new(),
            wife_birth_date: String::new(),
            registration_date: String::new(),
            registrar: String::new(),
            husband_id_number: String::new(),
            wife_id_number: String::new(),
            husband_id_url: "https://www.gov.cn".to_string(),
            wife_id_url: "https://www.gov.cn".to_string(),
            certificate_number: String::new(),
        }
    }
}

/// Sicht auf die Felder einer Person
#[derive(Debug, Clone, Copy)]
pub struct PartyView<'a> {
    pub name: &'a str,
    pub gender: &'a str,
    pub registration_place: &'a str,
    pub birth_date: &'a str,
    pub id_number: &'a str,
    pub id_url: &'a str,
}

impl CertificateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::HusbandName => &self.husband_name,
            RecordField::WifeName => &self.wife_name,
            RecordField::HusbandGender => &self.husband_gender,
            RecordField::WifeGender => &self.wife_gender,
            RecordField::HusbandRegistrationPlace => &self.husband_registration_place,
            RecordField::WifeRegistrationPlace => &self.wife_registration_place,
            RecordField::HusbandBirthDate => &self.husband_birth_date,
            RecordField::WifeBirthDate => &self.wife_birth_date,
            RecordField::RegistrationDate => &self.registration_date,
            RecordField::Registrar => &self.registrar,
            RecordField::HusbandIdNumber => &self.husband_id_number,
            RecordField::WifeIdNumber => &self.wife_id_number,
            RecordField::HusbandIdUrl => &self.husband_id_url,
            RecordField::WifeIdUrl => &self.wife_id_url,
        }
    }

    fn slot(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::HusbandName => &mut self.husband_name,
            RecordField::WifeName => &mut self.wife_name,
            RecordField::HusbandGender => &mut self.husband_gender,
            RecordField::WifeGender => &mut self.wife_gender,
            RecordField::HusbandRegistrationPlace => &mut self.husband_registration_place,
            RecordField::WifeRegistrationPlace => &mut self.wife_registration_place,
            RecordField::HusbandBirthDate => &mut self.husband_birth_date,
            RecordField::WifeBirthDate => &mut self.wife_birth_date,
            RecordField::RegistrationDate => &mut self.registration_date,
            RecordField::Registrar => &mut self.registrar,
            RecordField::HusbandIdNumber => &mut self.husband_id_number,
            RecordField::WifeIdNumber => &mut self.wife_id_number,
            RecordField::HusbandIdUrl => &mut self.husband_id_url,
            RecordField::WifeIdUrl => &mut self.wife_id_url,
        }
    }

    /// Setzt ein Feld. Nur bei Namensänderungen wird die Nummer neu
    /// berechnet, mit `today` als Datum.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>, today: NaiveDate) {
        *self.slot(field) = value.into();
        if field.is_name() {
            self.refresh_number(today);
        }
    }

    /// Leitet die Nummer aus den aktuellen Namen ab
    pub fn refresh_number(&mut self, today: NaiveDate) {
        self.certificate_number =
            derive_certificate_number(&self.husband_name, &self.wife_name, today);
    }

    pub fn certificate_number(&self) -> &str {
        &self.certificate_number
    }

    pub fn husband_name(&self) -> &str {
        &self.husband_name
    }

    pub fn wife_name(&self) -> &str {
        &self.wife_name
    }

    pub fn registration_date(&self) -> &str {
        &self.registration_date
    }

    pub fn registrar(&self) -> &str {
        &self.registrar
    }

    pub fn party(&self, party: Party) -> PartyView<'_> {
        match party {
            Party::First => PartyView {
                name: &self.husband_name,
                gender: &self.husband_gender,
                registration_place: &self.husband_registration_place,
                birth_date: &self.husband_birth_date,
                id_number: &self.husband_id_number,
                id_url: &self.husband_id_url,
            },
            Party::Second => PartyView {
                name: &self.wife_name,
                gender: &self.wife_gender,
                registration_place: &self.wife_registration_place,
                birth_date: &self.wife_birth_date,
                id_number: &self.wife_id_number,
                id_url: &self.wife_id_url,
            },
        }
    }

    /// Lädt einen Datensatz aus JSON; die Nummer wird neu abgeleitet.
    pub fn from_json_str(content: &str, today: NaiveDate) -> crate::error::Result<Self> {
        let mut record: Self = serde_json::from_str(content)?;
        record.refresh_number(today);
        Ok(record)
    }

    /// Lädt einen Datensatz aus einer JSON-Datei
    pub fn from_json_file(path: &str, today: NaiveDate) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    #[test]
    fn test_defaults() {
        let record = CertificateRecord::new();
        assert_eq!(record.get(RecordField::HusbandGender), "男");
        assert_eq!(record.get(RecordField::WifeGender), "女");
        assert_eq!(record.get(RecordField::HusbandIdUrl), "https://www.gov.cn");
        assert_eq!(record.husband_name(), "");
        assert_eq!(record.certificate_number(), "");
    }

    #[test]
    fn test_name_change_recomputes_number() {
        let mut record = CertificateRecord::new();
        record.set(RecordField::HusbandName, "张小帅", today());
        assert_eq!(record.certificate_number(), "");

        record.set(RecordField::WifeName, "萌小美", today());
        assert_eq!(record.certificate_number(), "520405-2024-052020405");

        record.set(RecordField::WifeName, "", today());
        assert_eq!(record.certificate_number(), "");
    }

    #[test]
    fn test_other_fields_leave_number_alone() {
        let mut record = CertificateRecord::new();
        record.set(RecordField::HusbandName, "张小帅", today());
        record.set(RecordField::WifeName, "萌小美", today());
        let number = record.certificate_number().to_string();

        let later = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        for field in RecordField::ALL.iter().filter(|f| !f.is_name()) {
            record.set(*field, "x", later);
            assert_eq!(record.certificate_number(), number, "{}", field);
        }
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("husbandName".parse::<RecordField>(), Ok(RecordField::HusbandName));
        assert_eq!("REGISTRAR".parse::<RecordField>(), Ok(RecordField::Registrar));
        assert!("certificateNumber".parse::<RecordField>().is_err());
    }

    #[test]
    fn test_json_rederives_number() {
        let json = r#"{ "husbandName": "张小帅", "wifeName": "萌小美", "certificateNumber": "forged" }"#;
        let record = CertificateRecord::from_json_str(json, today()).unwrap();
        assert_eq!(record.certificate_number(), "520405-2024-052020405");
        // Fehlende Felder bekommen Defaults
        assert_eq!(record.get(RecordField::WifeGender), "女");
    }

    #[test]
    fn test_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paar.json");
        let content = r#"{ "husbandName": "Alice", "wifeName": "Bob", "registrar": "李登记" }"#;
        std::fs::write(&path, content).unwrap();

        let record = CertificateRecord::from_json_file(path.to_str().unwrap(), today()).unwrap();
        assert_eq!(record.certificate_number(), "520205-2024-052017205");
        assert_eq!(record.registrar(), "李登记");

        let missing = dir.path().join("fehlt.json");
        assert!(CertificateRecord::from_json_file(missing.to_str().unwrap(), today()).is_err());
    }

    #[test]
    fn test_party_view() {
        let mut record = CertificateRecord::new();
        record.set(RecordField::WifeRegistrationPlace, "上海", today());
        let second = record.party(Party::Second);
        assert_eq!(second.registration_place, "上海");
        assert_eq!(second.gender, "女");
        assert_eq!(record.party(Party::First).registration_place, "");
    }
}
