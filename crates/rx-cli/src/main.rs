use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rx_core::calendar::{appointments_on, month_grid};
use rx_core::dashboard::DashboardSummary;
use rx_core::format::{format_date, format_phone, format_time};
use rx_core::prescription::PrescriptionStatus;
use rx_core::status::{status_label, tracker_view, DeliveryTracking};
use rx_core::{
    AppointmentService, CoreConfig, MedicationCatalog, PatientService, PharmacyService,
    PrescriptionService, RecordId,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rx")]
#[command(about = "RxDesk prescription and appointment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// List pharmacies
    Pharmacies {
        /// Only pharmacies that deliver
        #[arg(long)]
        delivery_only: bool,
    },
    /// List catalog medications
    Medications {
        /// Name, generic name or strength to search for
        search: Option<String>,
    },
    /// List prescriptions
    Prescriptions {
        /// Patient id
        #[arg(long)]
        patient: Option<String>,
        /// pending, filled, ready, delivered or cancelled
        #[arg(long)]
        status: Option<String>,
    },
    /// Set a prescription's status
    SetStatus {
        /// Prescription id
        id: String,
        /// New status
        status: String,
    },
    /// Show the status tracker for a prescription
    Track {
        /// Prescription id
        id: String,
    },
    /// Print a month calendar with appointment counts
    Calendar {
        year: i32,
        /// 1-12
        month: u32,
    },
    /// Add the sample pharmacies
    Seed,
    /// Show today's headline counts
    Dashboard,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Arc::new(CoreConfig::from_env()?);

    match cli.command {
        Some(Commands::List) => {
            let patients = PatientService::new(cfg).list(None);
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "ID: {}, Name: {}, Phone: {}, Born: {}",
                        patient.id,
                        patient.name,
                        format_phone(&patient.phone),
                        format_date(&patient.date_of_birth)
                    );
                }
            }
        }
        Some(Commands::Pharmacies { delivery_only }) => {
            let pharmacies = PharmacyService::new(cfg).list(delivery_only);
            if pharmacies.is_empty() {
                println!("No pharmacies found. Run `rx seed` to add the samples.");
            }
            for pharmacy in pharmacies {
                println!(
                    "ID: {}, {} ({}), ~{}min fill, rating {:.1}{}",
                    pharmacy.id,
                    pharmacy.name,
                    pharmacy.address,
                    pharmacy.estimated_fill_time,
                    pharmacy.rating,
                    if pharmacy.delivery_available {
                        ", delivers"
                    } else {
                        ""
                    }
                );
            }
        }
        Some(Commands::Medications { search }) => {
            for medication in MedicationCatalog::new().list(search.as_deref()) {
                println!(
                    "{}: {} {} [NDC {}]",
                    medication.id,
                    medication.display_name(),
                    medication.form,
                    medication.ndc
                );
            }
        }
        Some(Commands::Prescriptions { patient, status }) => {
            let status = status
                .as_deref()
                .map(str::parse::<PrescriptionStatus>)
                .transpose()?;
            let prescriptions = PrescriptionService::new(cfg).list(patient.as_deref(), status);
            if prescriptions.is_empty() {
                println!("No prescriptions found.");
            }
            for p in prescriptions {
                println!(
                    "ID: {}, {} for {}, {} via {} ({}), prescribed {}",
                    p.id,
                    p.medication,
                    p.patient_name,
                    status_label(p.status.as_str()),
                    p.pharmacy,
                    p.delivery_option,
                    format_date(&p.prescribed_date)
                );
            }
        }
        Some(Commands::SetStatus { id, status }) => {
            let id = RecordId::parse(&id)?;
            let status: PrescriptionStatus = status.parse()?;
            match PrescriptionService::new(cfg).set_status(&id, status) {
                Ok(p) => println!("Prescription {} is now {}", p.id, status_label(p.status.as_str())),
                Err(e) => eprintln!("Error setting status: {}", e),
            }
        }
        Some(Commands::Track { id }) => {
            let id = RecordId::parse(&id)?;
            let prescription = PrescriptionService::new(cfg).get(&id)?;
            let view = tracker_view(&prescription);

            println!("{} for {}", prescription.medication, prescription.patient_name);
            println!("Status: {} ({})", view.status_label, view.color.token());
            if view.cancelled {
                println!("This prescription has been cancelled.");
            }
            for step in &view.steps {
                println!(
                    "  [{}] {}: {}",
                    marker(step.completed, step.current),
                    step.label,
                    step.description
                );
            }
            match &view.delivery {
                DeliveryTracking::Pickup {
                    pharmacy,
                    ready_for_pickup,
                } => {
                    if *ready_for_pickup {
                        println!("Ready for pickup at {}", pharmacy);
                    } else {
                        println!("Pickup at {}", pharmacy);
                    }
                }
                DeliveryTracking::Delivery {
                    estimated_delivery,
                    steps,
                } => {
                    println!("Estimated delivery: {}", estimated_delivery);
                    for step in steps {
                        println!("  [{}] {}", marker(step.completed, step.current), step.label);
                    }
                }
            }
            if let Some(notes) = &view.notes {
                println!("Notes: {}", notes);
            }
        }
        Some(Commands::Calendar { year, month }) => {
            let Some(cells) = month_grid(year, month) else {
                eprintln!("Invalid month: {}-{}", year, month);
                return Ok(());
            };
            let appointments = AppointmentService::new(cfg).for_month(year, month);

            println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");
            for week in cells.chunks(7) {
                let line: Vec<String> = week
                    .iter()
                    .map(|cell| match cell {
                        Some(day) => {
                            let booked = NaiveDate::from_ymd_opt(year, month, *day)
                                .map_or(0, |date| appointments_on(&appointments, date).len());
                            if booked > 0 {
                                format!("{:>3}*", day)
                            } else {
                                format!("{:>3} ", day)
                            }
                        }
                        None => "    ".to_string(),
                    })
                    .collect();
                println!("{}", line.join(" "));
            }
            for a in &appointments {
                println!(
                    "{} {}: {} ({}, {})",
                    format_date(&a.date),
                    format_time(&a.time),
                    a.patient_name,
                    a.kind.as_str(),
                    a.status.as_str()
                );
            }
        }
        Some(Commands::Seed) => match PharmacyService::new(cfg).seed_samples() {
            Ok(added) => println!("Added {} sample pharmacies", added),
            Err(e) => eprintln!("Error seeding pharmacies: {}", e),
        },
        Some(Commands::Dashboard) => {
            let prescriptions = PrescriptionService::new(cfg.clone()).list(None, None);
            let appointments = AppointmentService::new(cfg).list(None, None, None);
            let summary =
                DashboardSummary::compute(&prescriptions, &appointments, Local::now().date_naive());
            println!("Today's prescriptions:  {}", summary.todays_prescriptions);
            println!("Ready for pickup:       {}", summary.ready_for_pickup);
            println!("Out for delivery:       {}", summary.out_for_delivery);
            println!("Upcoming appointments:  {}", summary.upcoming_appointments);
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn marker(completed: bool, current: bool) -> &'static str {
    if current {
        ">"
    } else if completed {
        "x"
    } else {
        " "
    }
}
