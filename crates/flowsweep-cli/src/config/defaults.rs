/// Built-in screening grids used when neither the configuration file nor the
/// command line provides a value.
pub struct DefaultsConfig {
    pub volumes_m3: Vec<f64>,
    pub temperatures_c: Vec<f64>,
    pub pressure_bar: f64,
    pub stage_counts: Vec<usize>,
    pub reflux_ratios: Vec<f64>,
    pub distillate_rate_kmol_h: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            volumes_m3: vec![0.5, 1.0, 2.0, 5.0],
            temperatures_c: vec![80.0, 100.0, 120.0, 150.0],
            pressure_bar: 1.0,
            stage_counts: vec![8, 10, 15, 20],
            reflux_ratios: vec![1.5, 2.0, 3.0, 4.0],
            distillate_rate_kmol_h: 50.0,
        }
    }
}
