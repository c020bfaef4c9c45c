//! Plan a handful of experiment designs and print the results
//!
//! Set `RUST_LOG=debug` to see the intermediate quantities.

use power_core::{
    BanditParams, CausalMethod, CausalParams, ClusterParams, ExperimentDesign, Factor,
    FactorialParams, MetricSpec, StatisticalParams, SwitchbackParams,
};
use power_planning::{check_sample_ratio, curve_sizes, plan, power_curve, ExperimentConfig, TrafficParams};
use power_sample_size::{mde_analysis, resolve_effect_size};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "power_sample_size=info,power_planning=info".into()),
        )
        .init();

    println!("=== Experiment Planning Examples ===\n");

    let conversion = MetricSpec::binary("checkout conversion", 0.05);
    let params = StatisticalParams::default().with_relative_mde(10.0);
    let traffic = TrafficParams::new(20_000.0).with_buffer_days(2);

    let designs = vec![
        ExperimentDesign::AbTest,
        ExperimentDesign::Cluster(ClusterParams::new(0.05, 50)),
        ExperimentDesign::Switchback(SwitchbackParams::new(56, 0.3).with_period_length(3.0)),
        ExperimentDesign::Factorial(
            FactorialParams::new(vec![Factor::new("headline", 2), Factor::new("color", 3)])
                .with_interaction(),
        ),
        ExperimentDesign::Mab(BanditParams::new(3, 100_000, 0.1)),
        ExperimentDesign::CausalInference(CausalParams::new(CausalMethod::Did {
            serial_correlation: Some(0.3),
        })),
    ];

    for (i, design) in designs.into_iter().enumerate() {
        let config = ExperimentConfig::new(design, conversion.clone(), params.clone())
            .with_traffic(traffic.clone());
        let plan = plan(&config)?;

        println!("{}. {}", i + 1, plan.design);
        println!("  {}", plan.sample_size);
        if let Some(duration) = &plan.duration {
            println!("  Duration: {} days ({} weeks)", duration.days, duration.weeks);
        }
        for warning in &plan.sample_size.warnings {
            println!("  ! {warning}");
        }
        println!();
    }

    // Inverse direction: what can 20k users per arm detect?
    let mde = mde_analysis(&conversion, 20_000.0, 0.05, 0.8)?;
    println!(
        "MDE with 20000 per variant: {:.5} absolute ({:.2}% relative)",
        mde.absolute,
        mde.relative.unwrap_or(f64::NAN)
    );

    let effect = resolve_effect_size(conversion.baseline, params.mde, params.mde_type);
    println!("\nPower curve for a {effect:.4} absolute lift:");
    for point in power_curve(&conversion, params.alpha, effect, &curve_sizes(31_235.0, 6))? {
        println!("  n = {:>8.0}  power = {:.3}", point.sample_size_per_variant, point.power);
    }

    let srm = check_sample_ratio(&[50_912, 49_088], &params.traffic_allocation)?;
    println!(
        "\nSRM check: chi² = {:.2}, p = {:.2e}, mismatch = {}",
        srm.chi_square, srm.p_value, srm.mismatch
    );

    println!("\nPlan as JSON:");
    let config = ExperimentConfig::new(ExperimentDesign::AbTest, conversion, params).with_traffic(traffic);
    println!("{}", plan(&config)?.to_json_pretty()?);

    Ok(())
}
