use std::collections::{HashMap, HashSet};

use log::warn;

use crate::params::table::ParameterTable;
use crate::params::value::Scalar;

/// Column holding the per-job directory name.
pub const JOB_NAME: &str = "JOB_NAME";

/// The full variable set for one job: the row's column values plus
/// `JOB_NAME`.
pub type ParamRow = HashMap<String, Scalar>;

/// One expanded job.
#[derive(Debug, Clone)]
pub struct Job {
    /// Rendered `JOB_NAME` value, used as the directory name.
    pub name: String,
    pub vars: ParamRow,
}

/// Expand a table into one job per row, in table row order.
///
/// Without a `JOB_NAME` column each row gets its 0-based index as the
/// name, so a bare table expands to jobs "0", "1", ...
pub fn expand(table: &ParameterTable) -> Vec<Job> {
    let mut jobs = Vec::with_capacity(table.rows());
    for row in 0..table.rows() {
        let mut vars: ParamRow = table
            .columns()
            .map(|(name, values)| (name.to_string(), values[row].clone()))
            .collect();
        let name = match vars.get(JOB_NAME) {
            Some(value) => value.to_string(),
            None => {
                vars.insert(JOB_NAME.to_string(), Scalar::Int(row as i64));
                row.to_string()
            }
        };
        jobs.push(Job { name, vars });
    }
    warn_duplicate_names(&jobs);
    jobs
}

/// Later rows with a name already taken get skipped at materialization
/// time, which is usually a table mistake worth flagging.
fn warn_duplicate_names(jobs: &[Job]) {
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.name.as_str()) {
            warn!("duplicate job name `{}`", job.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: Vec<(&str, Vec<Scalar>)>) -> ParameterTable {
        ParameterTable::from_columns(columns).unwrap()
    }

    #[test]
    fn synthesizes_job_names_from_row_indices() {
        let t = table(vec![(
            "alpha",
            vec![Scalar::Float(0.1), Scalar::Float(0.2), Scalar::Float(0.3)],
        )]);
        let jobs = expand(&t);
        let names: Vec<&str> = jobs.iter().map(|job| job.name.as_str()).collect();
        assert_eq!(names, vec!["0", "1", "2"]);
        assert_eq!(jobs[1].vars.get(JOB_NAME), Some(&Scalar::Int(1)));
    }

    #[test]
    fn keeps_an_existing_job_name_column() {
        let t = table(vec![
            (JOB_NAME, vec![Scalar::from("lo"), Scalar::from("hi")]),
            ("temp", vec![Scalar::Int(300), Scalar::Int(400)]),
        ]);
        let jobs = expand(&t);
        assert_eq!(jobs[0].name, "lo");
        assert_eq!(jobs[1].name, "hi");
        assert_eq!(jobs[1].vars.get("temp"), Some(&Scalar::Int(400)));
    }

    #[test]
    fn numeric_job_names_render_as_text() {
        let t = table(vec![(JOB_NAME, vec![Scalar::Int(7)])]);
        let jobs = expand(&t);
        assert_eq!(jobs[0].name, "7");
    }

    #[test]
    fn rows_come_out_in_table_order() {
        let values: Vec<Scalar> = (0..20).map(Scalar::Int).collect();
        let t = table(vec![("n", values)]);
        let jobs = expand(&t);
        for (idx, job) in jobs.iter().enumerate() {
            assert_eq!(job.vars.get("n"), Some(&Scalar::Int(idx as i64)));
        }
    }
}
