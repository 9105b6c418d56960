use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use typeforge::Operation;
use typeforge::prelude::*;

// ---------------------------------------------------------------------------
// Demo types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    sensor: u32,
    celsius: f32,
    samples: Vec<u16>,
}

impl Schema for Reading {
    const SCHEMA_NAME: &'static str = "demo.reading";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Alert {
    Overheat { sensor: u32, celsius: f32 },
    Offline { sensor: u32, since_ms: u64 },
}

impl Schema for Alert {
    const SCHEMA_NAME: &'static str = "demo.alert";
    const SCHEMA_VERSION: u16 = 2;
}

typeforge::submit_schema!(Reading, Alert);

/// Known to nobody: used to show the missing-codec path.
#[derive(Debug, Clone)]
struct Scratch;

const WORKERS: u32 = 4;
const ROUNDS: u32 = 8;

fn random_reading(sensor: u32) -> Reading {
    let mut rng = rand::rng();
    let len = rng.random_range(1..16);
    Reading {
        sensor,
        celsius: rng.random_range(-20.0..120.0),
        samples: (0..len).map(|_| rng.random()).collect(),
    }
}

fn alert_for(reading: &Reading) -> Option<Alert> {
    if reading.celsius > 100.0 {
        Some(Alert::Overheat {
            sensor: reading.sensor,
            celsius: reading.celsius,
        })
    } else if reading.samples.is_empty() {
        Some(Alert::Offline {
            sensor: reading.sensor,
            since_ms: 0,
        })
    } else {
        None
    }
}

/// Unboxes a deserialized value, failing if it isn't a `T`.
fn take<T: Schema>(value: Box<dyn Object>, ty: &TypeDescriptor) -> Result<T, RegistryError> {
    let found = (*value).type_name();
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .ok_or(RegistryError::TypeMismatch {
            operation: Operation::Deserialize,
            expected: ty.name(),
            found,
        })
}

/// Copies, writes, and reads back one reading (and its alert, if any)
/// through a shared token stream.
fn round_trip(
    registry: &Registry,
    reading: &Reading,
) -> Result<(Reading, Option<Alert>), RegistryError> {
    let reading_ty = TypeDescriptor::of::<Reading>();
    let alert_ty = TypeDescriptor::of::<Alert>();

    let copy = registry.copy_value(reading)?;
    let alert = alert_for(&copy);

    let mut sink = TokenWriter::new();
    registry.serialize(Some(&copy), Some(&mut sink), Some(&reading_ty))?;
    registry.serialize(
        alert.as_ref().map(|a| a as &dyn Object),
        Some(&mut sink),
        Some(&alert_ty),
    )?;

    let bytes = sink.into_bytes();
    let mut source = TokenReader::new(&bytes);
    let back = registry.deserialize(Some(&reading_ty), Some(&mut source))?;
    let back = take::<Reading>(back, &reading_ty)?;

    let back_alert = if source.try_read_null()? {
        None
    } else {
        let alert = registry.deserialize(Some(&alert_ty), Some(&mut source))?;
        Some(take::<Alert>(alert, &alert_ty)?)
    };

    Ok((back, back_alert))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,typeforge=debug".into()),
        )
        .init();

    let registry = Arc::new(Registry::with_static_schemas(RegistryConfig::default())?);
    registry.initialize(Arc::new(TracingLogger));
    tracing::info!(types = ?registry.registered_types(), "registry ready");

    let mut tasks = Vec::new();
    for worker in 0..WORKERS {
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            let mut alerts = 0u32;
            for round in 0..ROUNDS {
                let reading = random_reading(worker * 100 + round);
                let (back, alert) = round_trip(&registry, &reading)?;
                if back != reading {
                    tracing::error!(worker, round, "round trip changed the value");
                }
                if let Some(alert) = alert {
                    tracing::info!(worker, ?alert, "alert");
                    alerts += 1;
                }
                tokio::task::yield_now().await;
            }
            Ok::<_, RegistryError>(alerts)
        }));
    }

    let mut total_alerts = 0;
    for task in tasks {
        total_alerts += task.await??;
    }
    tracing::info!(
        rounds = WORKERS * ROUNDS,
        alerts = total_alerts,
        registrations = registry.registration_count(),
        "all workers done"
    );

    // Unregistered type: logged through TracingLogger and returned as an error.
    if let Err(err) = registry.deep_copy(Some(&Scratch)) {
        tracing::info!(%err, "expected failure for an unregistered type");
    }

    Ok(())
}
