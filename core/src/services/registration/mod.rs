//! Registration gate guarding account creation

mod gate;


pub use gate::RegistrationGate;
