use crate::validation::{FieldRules, Rule};

/// Rules an edited employee must satisfy before it is sent to the server.
pub fn employee_schema() -> FieldRules {
    FieldRules::new()
        .field("name", vec![Rule::required("Nome obrigatório")])
        .field(
            "email",
            vec![
                Rule::required("E-mail obrigatório"),
                Rule::email("Digite um e-mail válido"),
            ],
        )
        .field("sector", vec![Rule::required("Setor obrigatório")])
        .field("office", vec![Rule::required("Cargo obrigatório")])
        .field("level", vec![Rule::required("Nível obrigatório")])
        .field(
            "admission_date",
            vec![
                Rule::required("Data admissão obrigatória"),
                Rule::date("Data de admissão inválida"),
            ],
        )
        .field(
            "birthday_date",
            vec![
                Rule::required("Aniversário obrigatório"),
                Rule::date("Data de aniversário inválida"),
            ],
        )
}

// Invariants that must hold for the employee collection:
//
// 1. Ids are assigned by the server and never change
// 2. No two employees in the collection share an id
// 3. Local state changes only after the server confirmed the change
// 4. Nothing is sent to the server without passing `employee_schema`

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates::DateNormalization;
    use crate::domain::employee::UpdateEmployeeValues;
    use crate::validation::validate;

    #[test]
    fn test_schema_declares_every_payload_field() {
        let schema = employee_schema();
        let paths: Vec<&str> = schema.paths().collect();
        assert_eq!(
            paths,
            vec![
                "name",
                "email",
                "sector",
                "office",
                "level",
                "admission_date",
                "birthday_date"
            ]
        );
    }

    #[test]
    fn test_empty_form_reports_required_messages() {
        let record = UpdateEmployeeValues::default().into_record(DateNormalization::LegacyDayShift);
        let errors = validate(&employee_schema(), record).unwrap_err();

        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("name"), Some("Nome obrigatório"));
        assert_eq!(errors.get("email"), Some("E-mail obrigatório"));
        assert_eq!(errors.get("sector"), Some("Setor obrigatório"));
        assert_eq!(errors.get("office"), Some("Cargo obrigatório"));
        assert_eq!(errors.get("level"), Some("Nível obrigatório"));
        assert_eq!(errors.get("admission_date"), Some("Data admissão obrigatória"));
        assert_eq!(errors.get("birthday_date"), Some("Aniversário obrigatório"));
    }

    #[test]
    fn test_unparseable_date_is_reported_as_shape_error() {
        let values = UpdateEmployeeValues {
            name: "Alice".into(),
            email: "alice@empresa.com".into(),
            sector: "RH".into(),
            birthday_date: "31/02/1990".into(),
            admission_date: "2020-01-01".into(),
            office: "Analista".into(),
            level: "Pleno".into(),
        };

        let record = values.into_record(DateNormalization::LegacyDayShift);
        let errors = validate(&employee_schema(), record).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("birthday_date"), Some("Data de aniversário inválida"));
    }

    #[test]
    fn test_datetime_with_malformed_time_is_rejected() {
        let values = UpdateEmployeeValues {
            name: "Alice".into(),
            email: "alice@empresa.com".into(),
            sector: "RH".into(),
            birthday_date: "2020-03-01Tgarbage".into(),
            admission_date: "2020-01-01 not a time".into(),
            office: "Analista".into(),
            level: "Pleno".into(),
        };

        let record = values.into_record(DateNormalization::LegacyDayShift);
        let errors = validate(&employee_schema(), record).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("birthday_date"), Some("Data de aniversário inválida"));
        assert_eq!(errors.get("admission_date"), Some("Data de admissão inválida"));
    }

    #[test]
    fn test_complete_iso_datetime_is_accepted_and_shifted() {
        let values = UpdateEmployeeValues {
            name: "Alice".into(),
            email: "alice@empresa.com".into(),
            sector: "RH".into(),
            birthday_date: "1990-05-17T00:00:00.000Z".into(),
            admission_date: "2020-02-28 09:00:00".into(),
            office: "Analista".into(),
            level: "Pleno".into(),
        };

        let record = values.into_record(DateNormalization::LegacyDayShift);
        let valid = validate(&employee_schema(), record).unwrap();
        assert_eq!(valid["birthday_date"], "1990-05-18");
        assert_eq!(valid["admission_date"], "2020-02-29");
    }
}
