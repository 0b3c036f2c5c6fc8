// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use crate::Persistence;
use causalex::CreateCaseCommand;
use causalex_domain::{AssignmentMode, Jurisdiction, SpecialtyId, UserId};

/// Creates a fresh in-memory database for a test.
pub fn test_db() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database")
}

/// Seeds a specialty into the catalog.
pub fn seed_specialty(db: &mut Persistence, specialty_id: &str) {
    db.create_specialty(specialty_id, specialty_id)
        .expect("Specialty created");
}

/// Seeds a practicing lawyer covering the given specialties.
pub fn seed_lawyer(db: &mut Persistence, uid: &str, email: &str, specialties: &[&str]) {
    let specialties: Vec<String> = specialties.iter().map(ToString::to_string).collect();
    db.create_lawyer(uid, email, "lawyer", true, "secret-password", &specialties)
        .expect("Lawyer created");
}

/// Builds a valid auto-mode creation command.
pub fn auto_command(
    creator_uid: &str,
    specialty_id: &str,
    brought_by_participates: bool,
) -> CreateCaseCommand {
    CreateCaseCommand {
        creator_uid: UserId::new(creator_uid),
        caratula_tentativa: String::from("Perez c/ Gomez s/ danos"),
        specialty_id: SpecialtyId::new(specialty_id),
        objeto: String::from("Danos y perjuicios"),
        resumen: String::from("Accidente de transito en avenida principal"),
        jurisdiccion: Jurisdiction::Nacional,
        brought_by_participates,
        assignment_mode: AssignmentMode::Auto,
        direct_assignees_uids: Vec::new(),
        direct_justification: String::new(),
    }
}

/// Builds a valid direct-mode creation command naming two assignees.
pub fn direct_command(
    creator_uid: &str,
    specialty_id: &str,
    assignee_uids: &[&str],
    justification: &str,
) -> CreateCaseCommand {
    CreateCaseCommand {
        creator_uid: UserId::new(creator_uid),
        caratula_tentativa: String::from("Lopez c/ Diaz s/ despido"),
        specialty_id: SpecialtyId::new(specialty_id),
        objeto: String::from("Despido sin causa"),
        resumen: String::from("Reclamo de indemnizacion laboral"),
        jurisdiccion: Jurisdiction::ProvinciaBsAs,
        brought_by_participates: false,
        assignment_mode: AssignmentMode::Direct,
        direct_assignees_uids: assignee_uids.iter().map(|uid| UserId::new(*uid)).collect(),
        direct_justification: justification.to_string(),
    }
}
