use chrono::{NaiveDate, NaiveDateTime};
use fortia_grid::grid::Row;
use fortia_grid::views::{Candidate, SnapshotImporter, Vacancy, ViewKind};

/// Sample rows used when no snapshot is given.
pub(crate) fn rows(kind: ViewKind) -> Vec<Row> {
    match kind {
        ViewKind::Candidates => candidates(),
        ViewKind::Vacancies => vacancies(),
    }
}

fn applied(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).and_then(|date| date.and_hms_opt(9, 0, 0))
}

fn candidates() -> Vec<Row> {
    let people = [
        ("cand-1", "José Díaz", "Backend Engineer", "Entrevista", 82.0, applied(2025, 5, 2)),
        ("cand-2", "Ana Diaz", "Backend Engineer", "Nuevo", 64.0, applied(2025, 5, 9)),
        ("cand-3", "Luis Pérez", "Data Analyst", "En revisión", 91.0, applied(2025, 4, 28)),
        ("cand-4", "Marta Núñez", "Diseñador UX", "Oferta", 77.0, applied(2025, 5, 1)),
        ("cand-5", "Sofía Ortega", "Data Analyst", "Contratado", 88.0, applied(2025, 3, 15)),
        ("cand-6", "Iñaki Ramos", "Backend Engineer", "Rechazado", 45.0, None),
    ];

    let records: Vec<Candidate> = people
        .into_iter()
        .map(|(id, name, vacancy, status, score, date)| Candidate {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@fortia.mx", id.replace('-', ".")),
            vacancy: vacancy.to_string(),
            status: status.to_string(),
            match_score: Some(score),
            applied_on: date,
        })
        .collect();
    SnapshotImporter::from_records(records)
}

fn vacancies() -> Vec<Row> {
    let openings = [
        ("vac-1", "Backend Engineer", "Tecnología", "Lucía Gómez", "ACTIVA", 14.0, 3.0),
        ("vac-2", "Data Analyst", "Finanzas", "Mario Sáenz", "PAUSADA", 9.0, 21.0),
        ("vac-3", "Diseñador UX", "Tecnología", "Mario Sáenz", "BORRADOR", 0.0, 1.0),
        ("vac-4", "Contador Sr.", "Finanzas", "Lucía Gómez", "CERRADA", 31.0, 60.0),
        ("vac-5", "QA Tester", "Tecnología", "Lucía Gómez", "ACTIVA", 6.0, 8.0),
    ];

    let records: Vec<Vacancy> = openings
        .into_iter()
        .map(|(id, title, dept, recruiter, state, apps, days)| Vacancy {
            id: id.to_string(),
            position: title.to_string(),
            department: dept.to_string(),
            recruiter: recruiter.to_string(),
            state: state.to_string(),
            applications: Some(apps),
            published_days: Some(days),
        })
        .collect();
    SnapshotImporter::from_records(records)
}
