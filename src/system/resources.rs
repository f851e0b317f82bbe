//! Host resource and capability detection
//!
//! Collects the host snapshot shown by the `info` subcommand: user, kernel,
//! uptime, CPU and memory, plus the instruction-set extensions relevant to
//! the hashing hot paths.

use console::style;
use serde::Serialize;
use std::time::Duration;
use sysinfo::System;

/// Complete host information snapshot
#[derive(Debug, Clone, Serialize)]
pub struct HostInfo {
    /// Login user
    pub user: String,
    /// Host name
    pub hostname: String,
    /// Kernel name and version
    pub kernel: String,
    /// Operating system description
    pub os: String,
    /// Seconds since boot
    pub uptime_seconds: u64,
    /// Login shell
    pub shell: String,
    /// Terminal type
    pub terminal: String,
    /// CPU information
    pub cpu: CpuInfo,
    /// Total physical memory in bytes
    pub memory_total: u64,
}

/// CPU information
#[derive(Debug, Clone, Serialize)]
pub struct CpuInfo {
    /// CPU model name
    pub model: String,
    /// Vendor identifier
    pub vendor: String,
    /// Number of logical CPUs
    pub logical_cores: usize,
    /// Number of physical cores
    pub physical_cores: usize,
    /// Base frequency in MHz, zero when unknown
    pub frequency_mhz: u64,
    /// CPU architecture
    pub arch: String,
}

impl HostInfo {
    /// Collect the host snapshot
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        let (model, vendor, frequency_mhz) = sys
            .cpus()
            .first()
            .map(|cpu| {
                (
                    cpu.brand().trim().to_string(),
                    cpu.vendor_id().to_string(),
                    cpu.frequency(),
                )
            })
            .unwrap_or_else(|| ("unknown".into(), "unknown".into(), 0));

        HostInfo {
            user: std::env::var("USER")
                .or_else(|_| std::env::var("USERNAME"))
                .unwrap_or_else(|_| "unknown".into()),
            hostname: System::host_name().unwrap_or_else(|| "unknown".into()),
            kernel: System::kernel_version().unwrap_or_else(|| "unknown".into()),
            os: System::long_os_version().unwrap_or_else(|| "unknown".into()),
            uptime_seconds: System::uptime(),
            shell: std::env::var("SHELL").unwrap_or_else(|_| "unknown".into()),
            terminal: std::env::var("TERM").unwrap_or_else(|_| "unknown".into()),
            cpu: CpuInfo {
                model,
                vendor,
                logical_cores: num_cpus::get(),
                physical_cores: num_cpus::get_physical(),
                frequency_mhz,
                arch: std::env::consts::ARCH.to_string(),
            },
            memory_total: sys.total_memory(),
        }
    }

    /// Print the snapshot in the colored report layout
    pub fn print_summary(&self) {
        let label = |name: &str| style(format!("{name:<10}:")).green();
        println!(
            "{} {}@{}",
            label("User"),
            style(&self.user).color256(208),
            style(&self.hostname).yellow()
        );
        println!("{} {}", label("Kernel"), self.kernel);
        println!("{} {}", label("OS"), self.os);
        println!(
            "{} {} ({})",
            label("Uptime"),
            self.uptime_seconds,
            humantime::format_duration(Duration::from_secs(self.uptime_seconds))
        );
        println!("{} {}", label("Shell"), self.shell);
        println!("{} {}", label("Terminal"), self.terminal);
        println!(
            "{} {} ({} cores, {} threads, {} MHz)",
            label("CPU"),
            self.cpu.model,
            self.cpu.physical_cores,
            self.cpu.logical_cores,
            self.cpu.frequency_mhz
        );
        println!("{} {}", label("Arch"), self.cpu.arch);
        println!(
            "{} {}",
            label("RAM"),
            humansize::format_size(self.memory_total, humansize::BINARY)
        );
    }
}

/// Instruction-set extensions relevant to the hashing hot paths
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CpuFeatures {
    /// SSE4.2 (carries the `crc32` instruction)
    pub sse4_2: bool,
    /// AVX
    pub avx: bool,
    /// AVX2
    pub avx2: bool,
    /// BMI1
    pub bmi1: bool,
    /// BMI2
    pub bmi2: bool,
    /// FMA
    pub fma: bool,
}

impl CpuFeatures {
    /// Probe the running CPU
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            CpuFeatures {
                sse4_2: is_x86_feature_detected!("sse4.2"),
                avx: is_x86_feature_detected!("avx"),
                avx2: is_x86_feature_detected!("avx2"),
                bmi1: is_x86_feature_detected!("bmi1"),
                bmi2: is_x86_feature_detected!("bmi2"),
                fma: is_x86_feature_detected!("fma"),
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            CpuFeatures {
                sse4_2: false,
                avx: false,
                avx2: false,
                bmi1: false,
                bmi2: false,
                fma: false,
            }
        }
    }

    /// Print the feature report
    pub fn print_summary(&self) {
        println!("Advanced Instructions:");
        let flag = |present: bool| {
            if present {
                style("yes").magenta()
            } else {
                style("no").red()
            }
        };
        let label = |name: &str| style(format!("{name:<10}:")).green();
        println!("{} {}", label("SSE4.2"), flag(self.sse4_2));
        println!("{} {}/{}", label("AVX/AVX2"), flag(self.avx), flag(self.avx2));
        println!("{} {}/{}", label("BMI/BMI2"), flag(self.bmi1), flag(self.bmi2));
        println!("{} {}", label("FMA"), flag(self.fma));
    }
}
