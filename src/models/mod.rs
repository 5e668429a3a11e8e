// Modèle: user.rs
pub mod user;
pub use user::{
    Role, Personne, User, Patient, Docteur, Specialite,
    LoginRequest, LoginResponse, SignupForm, SignupRequest, DocteurSignupRequest,
    PatientProfileUpdate, DocteurProfileUpdate, NewUtilisateur, UtilisateurUpdate,
};

// Modèle: rendezvous.rs
pub mod rendezvous;
pub use rendezvous::{
    RendezVous, StatutRendezVous, CreateRendezVousRequest,
    BookingForm, StatutUpdate, NotesUpdate,
};

// Modèle: disponibilite.rs
pub mod disponibilite;
pub use disponibilite::{
    Disponibilite, CreateDisponibiliteRequest,
    VerificationRequest, VerificationDisponibilite,
};

// Modèle: statistiques.rs
pub mod statistiques;
pub use statistiques::{
    StatistiquesGlobales, StatistiquesDocteur, StatistiquesPatient,
    RapportMensuel, LogActivite,
};
