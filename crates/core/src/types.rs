/// Backend primary keys for professors are integers.
pub type ProfessorId = i64;
