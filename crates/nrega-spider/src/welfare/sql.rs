/// Insert head for welfare rows. The table is created by `sql/mgnrega.sql`,
/// never by this crate.
pub(crate) const INSERT_WELFARE: &'static str = "
    INSERT INTO mgnrega_data (
        state_name,
        district_name,
        month_year,
        jobcards_issued,
        households_worked,
        total_persondays,
        total_wages_paid
    )
    VALUES ";

/// Number of columns per welfare row.
pub(crate) const COLUMNS: usize = 7;

/// Build one bulk INSERT statement covering `rows` rows: a `($n, ...)` group
/// of [`COLUMNS`] ordered placeholders per row. No conflict clause, so
/// repeated cycles over the same months append duplicate rows.
pub(crate) fn bulk_insert(rows: usize) -> String {
    let mut stmt = String::from(INSERT_WELFARE);
    for row in 0..rows {
        if row > 0 {
            stmt.push_str(", ");
        }
        stmt.push('(');
        for col in 1..=COLUMNS {
            if col > 1 {
                stmt.push_str(", ");
            }
            stmt.push_str(&format!("${}", row * COLUMNS + col));
        }
        stmt.push(')');
    }
    stmt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_one_group() {
        let stmt = bulk_insert(1);
        assert!(stmt.trim_start().starts_with("INSERT INTO mgnrega_data"));
        assert!(stmt.ends_with("($1, $2, $3, $4, $5, $6, $7)"));
    }

    #[test]
    fn one_statement_n_groups() {
        let stmt = bulk_insert(3);

        // a single statement, not one per row
        assert_eq!(stmt.matches("INSERT INTO").count(), 1);
        assert!(!stmt.contains(';'));

        // 3 row groups, 21 ordered placeholders
        assert_eq!(stmt.matches('(').count(), 1 + 3); // column list + 3 groups
        assert_eq!(stmt.matches('$').count(), 21);
        assert!(stmt.contains("$8"));
        assert!(stmt.ends_with("($15, $16, $17, $18, $19, $20, $21)"));
    }

    #[test]
    fn no_conflict_clause() {
        // the same payload inserted twice lands twice
        assert!(!bulk_insert(5).contains("ON CONFLICT"));
    }
}
