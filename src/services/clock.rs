//! Fuente de tiempo
//!
//! Todas las horas del dominio son hora local sin zona (como el campo
//! `datetime-local` del formulario). El store y las vistas piden "ahora" y
//! "hoy" a un `Clock` inyectado.

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reloj del sistema en hora local
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Reloj fijo y ajustable, para tests y demos deterministas
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
