//! Development error tracer.
//!
//! Every precondition violation in the driver ends up in [`report_error`].
//! Reports are logged, then handed to the hook the application installed
//! with [`set_report_hook`], if any. Nothing is returned to the caller, the
//! report is purely diagnostic.

use core::cell::Cell;

use critical_section::Mutex;
use num_traits::FromPrimitive;

use crate::error::{PortError, ServiceId};

/// One development error report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DetReport {
    pub module_id: u16,
    pub instance_id: u8,
    pub api_id: u8,
    pub error_id: u8,
}

impl DetReport {
    pub fn service(&self) -> Option<ServiceId> {
        ServiceId::from_u8(self.api_id)
    }

    pub fn error(&self) -> Option<PortError> {
        PortError::from_u8(self.error_id)
    }
}

pub type ReportHook = fn(DetReport);

static REPORT_HOOK: Mutex<Cell<Option<ReportHook>>> = Mutex::new(Cell::new(None));

/// Installs the function that receives every report. Replaces any previous hook.
pub fn set_report_hook(hook: ReportHook) {
    critical_section::with(|cs| REPORT_HOOK.borrow(cs).set(Some(hook)));
}

pub fn clear_report_hook() {
    critical_section::with(|cs| REPORT_HOOK.borrow(cs).set(None));
}

#[cfg_attr(test, mry::mry)]
pub fn report_error(module_id: u16, instance_id: u8, api_id: u8, error_id: u8) {
    log::error!(
        "det: module {} instance {} api 0x{:02X} error 0x{:02X}",
        module_id,
        instance_id,
        api_id,
        error_id
    );

    let hook = critical_section::with(|cs| REPORT_HOOK.borrow(cs).get());
    if let Some(hook) = hook {
        hook(DetReport {
            module_id,
            instance_id,
            api_id,
            error_id,
        });
    }
}
