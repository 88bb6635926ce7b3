use crate::domain::entities::run::EscapePolicy;
use crate::domain::entities::table::Cell;

/// Column classification derived from the original header text. Both the
/// declared SQL type and literal rendering follow from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Phone,
    Address,
    TaxId,
    Rating,
    Descriptive,
    Text,
}

impl ColumnKind {
    /// Case-insensitive substring match, first rule wins.
    pub fn from_column_name(column_name: &str) -> Self {
        let name = column_name.to_lowercase();
        let has = |needle: &str| name.contains(needle);

        if has("телефон") || has("phone") {
            ColumnKind::Phone
        } else if has("адрес") {
            ColumnKind::Address
        } else if has("инн") {
            ColumnKind::TaxId
        } else if has("рейтинг") {
            ColumnKind::Rating
        } else if has("тип") || has("наименование") || has("директор") {
            ColumnKind::Descriptive
        } else {
            ColumnKind::Text
        }
    }

    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnKind::Phone => "NVARCHAR(20)",
            ColumnKind::Address => "NVARCHAR(500)",
            ColumnKind::TaxId => "NVARCHAR(12)",
            ColumnKind::Rating => "INT",
            ColumnKind::Descriptive | ColumnKind::Text => "NVARCHAR(255)",
        }
    }

    pub fn render(self, cell: &Cell, escape: EscapePolicy) -> String {
        let Some(text) = cell.as_deref() else {
            return "NULL".to_string();
        };

        match (self, escape) {
            (ColumnKind::Rating, _) => text.to_string(),
            (ColumnKind::Phone | ColumnKind::TaxId, EscapePolicy::Compatible) => {
                format!("N'{text}'")
            }
            _ => format!("N'{}'", text.replace('\'', "''")),
        }
    }
}

/// Declared type for a column in `CREATE TABLE`.
pub fn infer_sql_type(column_name: &str) -> &'static str {
    ColumnKind::from_column_name(column_name).sql_type()
}

/// SQL literal for one cell of the column named `column_name`.
pub fn render_value(cell: &Cell, column_name: &str, escape: EscapePolicy) -> String {
    ColumnKind::from_column_name(column_name).render(cell, escape)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Cell {
        Some(value.to_string())
    }

    #[test]
    fn rules_are_checked_in_priority_order() {
        assert_eq!(infer_sql_type("Телефон рейтинга"), "NVARCHAR(20)");
        assert_eq!(infer_sql_type("Mobile PHONE"), "NVARCHAR(20)");
        assert_eq!(infer_sql_type("Юридический АДРЕС"), "NVARCHAR(500)");
        assert_eq!(infer_sql_type("ИНН"), "NVARCHAR(12)");
        assert_eq!(infer_sql_type("Рейтинг"), "INT");
        assert_eq!(infer_sql_type("Тип рейтинга"), "INT");
        assert_eq!(infer_sql_type("Генеральный директор"), "NVARCHAR(255)");
        assert_eq!(infer_sql_type("Комментарий"), "NVARCHAR(255)");
    }

    #[test]
    fn substring_match_catches_words_containing_inn() {
        assert_eq!(
            ColumnKind::from_column_name("Длинное описание"),
            ColumnKind::TaxId
        );
    }

    #[test]
    fn compatible_escaping_leaves_phone_and_inn_raw() {
        let value = text("O'Neil");
        assert_eq!(
            render_value(&value, "Телефон", EscapePolicy::Compatible),
            "N'O'Neil'"
        );
        assert_eq!(
            render_value(&value, "ИНН", EscapePolicy::Compatible),
            "N'O'Neil'"
        );
        assert_eq!(
            render_value(&value, "Адрес", EscapePolicy::Compatible),
            "N'O''Neil'"
        );
        assert_eq!(
            render_value(&value, "Название", EscapePolicy::Compatible),
            "N'O''Neil'"
        );
    }

    #[test]
    fn uniform_escaping_doubles_quotes_everywhere_but_rating() {
        let value = text("O'Neil");
        assert_eq!(
            render_value(&value, "Phone", EscapePolicy::Uniform),
            "N'O''Neil'"
        );
        assert_eq!(
            render_value(&value, "ИНН", EscapePolicy::Uniform),
            "N'O''Neil'"
        );
        assert_eq!(
            render_value(&text("42"), "Рейтинг", EscapePolicy::Uniform),
            "42"
        );
    }

    #[test]
    fn null_cells_render_as_null_in_every_column() {
        for name in ["Телефон", "Адрес", "ИНН", "Рейтинг", "Тип", "Прочее"] {
            assert_eq!(render_value(&None, name, EscapePolicy::Compatible), "NULL");
        }
    }
}
