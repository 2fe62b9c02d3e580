use pepnorm::core::chemistry::tables::DEFAULT_PH;

pub struct DefaultsConfig {
    pub threshold_um: f64,
    pub ph: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            threshold_um: 25.0,
            ph: DEFAULT_PH,
        }
    }
}
