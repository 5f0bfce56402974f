use crate::error::Result;
use crate::template::{CertificateRecord, RecordField};
use chrono::{Local, NaiveDate};
use std::io::{self, BufRead, Write};

/// Liest eine Zeile von `input`
fn read_line(input: &mut impl BufRead, prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Gemeinsame Angaben für alle Paare
const SHARED: [(RecordField, &str); 2] = [
    (RecordField::RegistrationDate, "Registrierungsdatum (z.B. 2024-05-20): "),
    (RecordField::Registrar, "Standesbeamter/in: "),
];

/// Angaben je Paar; leer lassen = Default behalten
const PER_COUPLE: [(RecordField, &str); 10] = [
    (RecordField::HusbandGender, "Geschlecht (leer = 男): "),
    (RecordField::HusbandRegistrationPlace, "Registrierungsort: "),
    (RecordField::HusbandBirthDate, "Geburtsdatum: "),
    (RecordField::HusbandIdNumber, "Ausweisnummer: "),
    (RecordField::HusbandIdUrl, "Prüf-Link (leer = https://www.gov.cn): "),
    (RecordField::WifeGender, "Geschlecht (leer = 女): "),
    (RecordField::WifeRegistrationPlace, "Registrierungsort: "),
    (RecordField::WifeBirthDate, "Geburtsdatum: "),
    (RecordField::WifeIdNumber, "Ausweisnummer: "),
    (RecordField::WifeIdUrl, "Prüf-Link (leer = https://www.gov.cn): "),
];

/// Interaktives Erstellen einer JSON-Datei
pub fn create_json_interactive(output_path: &str) -> Result<()> {
    let stdin = io::stdin();
    let records = collect_records(&mut stdin.lock(), Local::now().date_naive())?;

    if records.is_empty() {
        println!("❌ Keine Paare eingegeben!");
        return Ok(());
    }

    println!();
    println!("💾 Speichere JSON...");
    let json = serde_json::to_string_pretty(&records)?;
    std::fs::write(output_path, json)?;

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║  ✅ JSON erfolgreich erstellt!                       ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("📄 Datei: {}", output_path);
    println!("💑 Anzahl Paare: {}", records.len());
    for record in &records {
        println!(
            "  • {} & {}  ->  {}",
            record.husband_name(),
            record.wife_name(),
            record.certificate_number()
        );
    }
    println!();
    println!("🚀 Nächster Schritt:");
    println!("   lovecert batch -j {} -t traditional -o zertifikate", output_path);
    println!();

    Ok(())
}

/// Fragt die Datensätze ab, bis ein leerer erster Name eingegeben wird
pub fn collect_records(
    input: &mut impl BufRead,
    today: NaiveDate,
) -> Result<Vec<CertificateRecord>> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║  💌 Interaktiver JSON-Generator für Urkunden         ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    println!("📌 Allgemeine Informationen (für alle Paare)");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let mut shared = Vec::new();
    for (field, prompt) in SHARED {
        let value = read_line(input, prompt)?;
        if !value.is_empty() {
            shared.push((field, value));
        }
    }

    println!();
    println!("👥 Paare");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Erster Name leer = fertig");

    let mut records = Vec::new();
    loop {
        let number = records.len() + 1;
        println!();
        let first = read_line(input, &format!("  {}. Erste Person, Name: ", number))?;
        if first.is_empty() {
            break;
        }
        let second = read_line(input, &format!("  {}. Zweite Person, Name: ", number))?;
        if second.is_empty() {
            println!("⚠️  Zweiter Name fehlt, Paar wird übersprungen.");
            continue;
        }

        let mut record = CertificateRecord::new();
        record.set(RecordField::HusbandName, first, today);
        record.set(RecordField::WifeName, second, today);
        for (field, value) in &shared {
            record.set(*field, value.clone(), today);
        }
        for (field, prompt) in PER_COUPLE {
            let value = read_line(input, &format!("     {}", prompt))?;
            if !value.is_empty() {
                record.set(field, value, today);
            }
        }

        println!("  ✓ Nummer: {}", record.certificate_number());
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_collect_records() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let script = [
            "2024-05-20", "李登记", // gemeinsam
            "张小帅", "萌小美", "", "北京", "1995-03-14", "", "", "", "上海", "", "", "",
            "Solo", "", // wird übersprungen
            "", // fertig
        ]
        .join("\n");

        let records = collect_records(&mut Cursor::new(script), today).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.certificate_number(), "520405-2024-052020405");
        assert_eq!(record.registrar(), "李登记");
        assert_eq!(record.get(RecordField::HusbandGender), "男");
        assert_eq!(record.get(RecordField::HusbandRegistrationPlace), "北京");
        assert_eq!(record.get(RecordField::WifeRegistrationPlace), "上海");
        assert_eq!(record.get(RecordField::WifeIdUrl), "https://www.gov.cn");
    }

    #[test]
    fn test_eof_ends_input() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let records = collect_records(&mut Cursor::new(""), today).unwrap();
        assert!(records.is_empty());
    }
}
