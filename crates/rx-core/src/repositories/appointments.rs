//! Appointment scheduling.

use crate::appointment::{Appointment, AppointmentDraft, AppointmentStatus, AppointmentType};
use crate::calendar::{appointments_in_month, appointments_on};
use crate::config::CoreConfig;
use crate::patient::Patient;
use crate::prescription::Prescription;
use crate::repositories::resolve_reference;
use crate::store::RecordStore;
use crate::validation::{ensure_valid, validate_appointment_at, FieldError};
use crate::{RecordId, RxResult};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppointmentService {
    store: RecordStore<Appointment>,
    patients: RecordStore<Patient>,
    prescriptions: RecordStore<Prescription>,
}

impl AppointmentService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: RecordStore::new(cfg.appointments_dir()),
            patients: RecordStore::new(cfg.patients_dir()),
            prescriptions: RecordStore::new(cfg.prescriptions_dir()),
        }
    }

    /// Lists appointments in date and time order.
    ///
    /// `date` matches appointments on that calendar day.
    pub fn list(
        &self,
        patient_id: Option<&str>,
        date: Option<NaiveDate>,
        status: Option<AppointmentStatus>,
    ) -> Vec<Appointment> {
        let all = self.sorted();
        let on_day: Vec<Appointment> = match date {
            Some(day) => appointments_on(&all, day).into_iter().cloned().collect(),
            None => all,
        };
        on_day
            .into_iter()
            .filter(|a| patient_id.map_or(true, |id| a.patient_id == id))
            .filter(|a| status.map_or(true, |s| a.status == s))
            .collect()
    }

    fn sorted(&self) -> Vec<Appointment> {
        let mut appointments = self.store.list();
        appointments.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        appointments
    }

    pub fn for_day(&self, date: NaiveDate) -> Vec<Appointment> {
        self.list(None, Some(date), None)
    }

    pub fn for_month(&self, year: i32, month: u32) -> Vec<Appointment> {
        let all = self.sorted();
        appointments_in_month(&all, year, month)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &RecordId) -> RxResult<Appointment> {
        self.store.get(id)
    }

    pub fn create(&self, draft: AppointmentDraft) -> RxResult<Appointment> {
        self.create_at(draft, Local::now().naive_local())
    }

    /// Books an appointment, which must start after `now`.
    ///
    /// Status defaults to scheduled and the patient name is copied from the patient record.
    pub fn create_at(
        &self,
        mut draft: AppointmentDraft,
        now: NaiveDateTime,
    ) -> RxResult<Appointment> {
        let mut errors = validate_appointment_at(&draft, now);
        self.resolve_patient(&mut draft, &mut errors)?;
        ensure_valid(errors)?;

        let appointment = Appointment::from_draft(RecordId::new(), draft);
        self.store.insert(&appointment)?;
        tracing::info!(
            id = %appointment.id,
            date = %appointment.date,
            time = %appointment.time,
            "appointment created"
        );
        Ok(appointment)
    }

    pub fn update(&self, id: &RecordId, patch: AppointmentDraft) -> RxResult<Appointment> {
        self.update_at(id, patch, Local::now().naive_local())
    }

    /// Applies the fields present in `patch`.
    ///
    /// The future-date rule is only enforced when the patch moves the appointment, so past
    /// appointments can still be marked completed or no-show. The patient is only looked up again
    /// when the patch changes it.
    pub fn update_at(
        &self,
        id: &RecordId,
        patch: AppointmentDraft,
        now: NaiveDateTime,
    ) -> RxResult<Appointment> {
        let existing = self.store.get(id)?;
        let rescheduled = patch.date.as_ref().is_some_and(|d| *d != existing.date)
            || patch.time.as_ref().is_some_and(|t| *t != existing.time);
        let patient_changed = patch
            .patient_id
            .as_ref()
            .is_some_and(|p| *p != existing.patient_id);

        let mut merged = existing.merged(patch);
        let clock = if rescheduled { now } else { NaiveDateTime::MIN };
        let mut errors = validate_appointment_at(&merged, clock);
        if patient_changed {
            self.resolve_patient(&mut merged, &mut errors)?;
        }
        ensure_valid(errors)?;

        let appointment = Appointment::from_draft(existing.id, merged);
        self.store.replace(&appointment)?;
        tracing::info!(id = %appointment.id, status = %appointment.status.as_str(), "appointment updated");
        Ok(appointment)
    }

    pub fn delete(&self, id: &RecordId) -> RxResult<()> {
        self.store.remove(id)?;
        tracing::info!(id = %id, "appointment deleted");
        Ok(())
    }

    /// Books a follow-up visit linked to a prescription.
    ///
    /// The patient defaults to the prescription's patient and the reason, when left blank, to
    /// "Follow-up for prescription <id>".
    pub fn schedule_follow_up(
        &self,
        prescription_id: &RecordId,
        mut draft: AppointmentDraft,
    ) -> RxResult<Appointment> {
        let prescription = self.prescriptions.get(prescription_id)?;

        if draft.patient_id.as_deref().map_or(true, str::is_empty) {
            draft.patient_id = Some(prescription.patient_id);
        }
        if draft.reason.as_deref().map_or(true, |r| r.trim().is_empty()) {
            draft.reason = Some(format!("Follow-up for prescription {prescription_id}"));
        }
        draft.kind = Some(AppointmentType::FollowUp);
        draft.prescription_ids = Some(vec![prescription_id.to_string()]);

        self.create(draft)
    }

    fn resolve_patient(
        &self,
        draft: &mut AppointmentDraft,
        errors: &mut Vec<FieldError>,
    ) -> RxResult<()> {
        if let Some(patient) = resolve_reference(
            &self.patients,
            draft.patient_id.as_deref(),
            "patientId",
            "Patient not found",
            errors,
        )? {
            draft.patient_name = Some(patient.name);
        }
        Ok(())
    }
}
