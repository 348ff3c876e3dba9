//! Controladores
//!
//! Estado de la interfaz: formulario de registro, notificaciones y el
//! compositor de vistas que conecta las acciones del usuario con el store.

pub mod notifications;
pub mod registration_form;
pub mod view_composer;
