//! upconf demo: firmware upgrade simulation + codec benchmark
//!
//! Skenario:
//! 1. Firmware lama menulis config kendaraan (schema v1)
//! 2. Firmware baru membaca config itu dengan schema v2
//!    (ECU SN lebih panjang, ada field flash counter baru)
//! 3. Ukur latency encode/decode
//!
//! Usage:
//!   cargo run --release -- [--iterations N] [--store PATH] [--verbose]

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use upconf::{BoolField, ConfigStore, Field, Record, StoreConfig, TextField, UintField};

/// Positional key untuk record kendaraan. Append-only!
#[repr(usize)]
#[derive(Debug, Clone, Copy)]
enum VehicleField {
    EcuSn,
    Vin,
    LastFlashedTune,
    TuneCompat,
    ChecksumCompat,
    RecoveryMode,
    FlashCount,
}

type VehicleConfigV1 = Record<(
    TextField<50>,  // ECU SN
    TextField<20>,  // VIN
    TextField<255>, // last flashed tune
    TextField<30>,  // tune compat
    TextField<30>,  // checksum compat
    BoolField,      // recovery mode
)>;

type VehicleConfigV2 = Record<(
    TextField<70>,  // ECU SN
    TextField<20>,  // VIN
    TextField<255>, // last flashed tune
    TextField<30>,  // tune compat
    TextField<30>,  // checksum compat
    BoolField,      // recovery mode
    UintField,      // flash counter
)>;

/// Command-line arguments untuk demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Jumlah iterasi benchmark
    #[arg(short, long, default_value_t = 1_000_000)]
    iterations: usize,

    /// Round-trip lewat mmap slot di path ini
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Ukuran slot dalam bytes
    #[arg(long, default_value_t = 4096)]
    capacity: usize,

    /// Log level debug
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    println!("🔧 upconf - Upgradeable Config Records");
    println!("======================================\n");

    let v1_config = firmware_v1_config();
    demo_upgrade(&v1_config);

    benchmark_codec(args.iterations);

    if let Some(path) = args.store {
        let config = StoreConfig {
            path,
            capacity: args.capacity,
        };
        if let Err(e) = demo_store(&config) {
            eprintln!("❌ Store error: {}", e);
            std::process::exit(1);
        }
    }

    println!("\n✅ Done!");
}

fn firmware_v1_config() -> VehicleConfigV1 {
    let mut config = VehicleConfigV1::new();
    config
        .get_mut::<{ VehicleField::EcuSn as usize }>()
        .set("AA BB CC DD EE");
    config
        .get_mut::<{ VehicleField::Vin as usize }>()
        .set("1DJCAFECAFECAFECAFE");
    config
        .get_mut::<{ VehicleField::LastFlashedTune as usize }>()
        .set("stage1_v3.bin");
    config
        .get_mut::<{ VehicleField::RecoveryMode as usize }>()
        .set(false);
    config
}

fn demo_upgrade(config: &VehicleConfigV1) {
    println!("📦 Firmware Upgrade Simulation");
    println!("------------------------------");

    // Ukuran buffer diketahui saat compile time
    let mut write_buf = [0u8; VehicleConfigV1::ENCODED_SIZE];
    if let Err(e) = config.serialize(&mut write_buf) {
        eprintln!("❌ Encode error: {}", e);
        return;
    }

    // Firmware baru tidak tahu ukuran record lama: baca dari prefix
    let disk_size = VehicleConfigV2::read_root_size(&write_buf).unwrap_or(0);

    let mut upgraded = VehicleConfigV2::new();
    upgraded.deserialize(&write_buf[..disk_size.min(write_buf.len())]);

    println!("  v1 encoded size: {} bytes", VehicleConfigV1::ENCODED_SIZE);
    println!("  v2 encoded size: {} bytes", VehicleConfigV2::ENCODED_SIZE);
    println!("  Stored size:     {} bytes", disk_size);
    println!("  Record present:  {}", upgraded.has_value());

    let ecu_sn = upgraded.get::<{ VehicleField::EcuSn as usize }>();
    println!(
        "  ECU SN:          {:?} (present: {})",
        ecu_sn.as_str().unwrap_or("<invalid utf-8>"),
        ecu_sn.has_value()
    );
    let vin = upgraded.get::<{ VehicleField::Vin as usize }>();
    println!(
        "  VIN:             {:?} (present: {})",
        vin.as_str().unwrap_or("<invalid utf-8>"),
        vin.has_value()
    );
    let flash_count = upgraded.get::<{ VehicleField::FlashCount as usize }>();
    println!(
        "  Flash count:     {} (present: {})",
        flash_count.get(),
        flash_count.has_value()
    );

    let tune_compat = upgraded.get::<{ VehicleField::TuneCompat as usize }>();
    let checksum_compat = upgraded.get::<{ VehicleField::ChecksumCompat as usize }>();
    println!(
        "  Compat fields:   tune={:?} checksum={:?}",
        tune_compat.as_str().unwrap_or(""),
        checksum_compat.as_str().unwrap_or("")
    );

    // Firmware baru sekarang menulis ulang record dengan schema v2 penuh
    let next_count = next_flash_count(flash_count.get());
    upgraded
        .get_mut::<{ VehicleField::FlashCount as usize }>()
        .set(next_count);
    let mut rewrite_buf = [0u8; VehicleConfigV2::ENCODED_SIZE];
    match upgraded.serialize(&mut rewrite_buf) {
        Ok(n) => println!("  Rewritten as v2: {} bytes\n", n),
        Err(e) => eprintln!("❌ Encode error: {}", e),
    }
}

/// Counter berhenti di `u32::MAX`, tidak wrap ke nol
fn next_flash_count(current: u32) -> u32 {
    current.saturating_add(1)
}

fn benchmark_codec(iterations: usize) {
    println!("📊 Codec Benchmark (Zero-Allocation)");
    println!("------------------------------------");

    let config = firmware_v1_config();
    let mut buf = [0u8; VehicleConfigV1::ENCODED_SIZE];

    // Benchmark encode
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = std::hint::black_box(&config).serialize(&mut buf);
    }
    let encode_duration = start.elapsed();

    // Benchmark decode (same schema)
    let mut same = VehicleConfigV1::new();
    let start = Instant::now();
    for _ in 0..iterations {
        same.deserialize(std::hint::black_box(&buf));
    }
    let decode_duration = start.elapsed();

    // Benchmark decode (upgrade path)
    let mut upgraded = VehicleConfigV2::new();
    let start = Instant::now();
    for _ in 0..iterations {
        upgraded.deserialize(std::hint::black_box(&buf));
    }
    let upgrade_duration = start.elapsed();

    let per_op = |d: std::time::Duration| d.as_nanos() as f64 / iterations.max(1) as f64;

    println!("  Record size: {} bytes", VehicleConfigV1::ENCODED_SIZE);
    println!("  Operations:  {}", iterations);
    println!(
        "  Encode latency:         {:.2} ns/op",
        per_op(encode_duration)
    );
    println!(
        "  Decode latency (v1→v1): {:.2} ns/op",
        per_op(decode_duration)
    );
    println!(
        "  Decode latency (v1→v2): {:.2} ns/op",
        per_op(upgrade_duration)
    );
    println!(
        "  Encode throughput:      {:.2} MB/sec",
        (iterations * VehicleConfigV1::ENCODED_SIZE) as f64
            / encode_duration.as_secs_f64()
            / 1_000_000.0
    );
}

fn demo_store(config: &StoreConfig) -> Result<(), upconf::StoreError> {
    println!("\n💾 Mmap Slot Round-Trip");
    println!("-----------------------");

    let mut store = ConfigStore::open(config)?;
    let written = store.store(&firmware_v1_config())?;

    let mut upgraded = VehicleConfigV2::new();
    let consumed = store.load(&mut upgraded);

    println!("  Slot: {} ({} bytes)", config.path.display(), store.capacity());
    println!("  Written: {} bytes, read back: {} bytes", written, consumed);
    println!("  Record present: {}", upgraded.has_value());

    Ok(())
}
