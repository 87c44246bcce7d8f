use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::Writer;

use crate::record::ResumeRecord;

pub fn write_csv(path: &Path, records: &[ResumeRecord]) -> io::Result<()> {
    let file = File::create(path)?;
    write_records(file, records)
}

pub fn write_records<W: Write>(out: W, records: &[ResumeRecord]) -> io::Result<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record([
        "Filename",
        "Name",
        "Email",
        "Phone",
        "Experience (years)",
        "Skills",
        "Education",
    ])?;

    for record in records {
        let experience = record.experience_years.to_string();
        let skills = record.skills.join("; ");
        let education = record.education.join("; ");
        wtr.write_record([
            record.filename.as_str(),
            record.name.as_str(),
            record.email_or_na(),
            record.phone_or_na(),
            experience.as_str(),
            skills.as_str(),
            education.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_use_sentinels_and_joined_lists() {
        let record = ResumeRecord {
            filename: "jane.pdf".into(),
            name: "Jane Doe".into(),
            email: Some("jane@co.com".into()),
            phone: None,
            experience_years: 5,
            skills: vec!["python".into(), "sql".into()],
            education: vec![],
            text_preview: "ignored".into(),
        };

        let mut buf = Vec::new();
        write_records(&mut buf, &[record]).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "Filename,Name,Email,Phone,Experience (years),Skills,Education\n\
             jane.pdf,Jane Doe,jane@co.com,N/A,5,python; sql,\n"
        );
    }
}
