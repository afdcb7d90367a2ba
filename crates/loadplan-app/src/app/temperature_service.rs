//! Temperature Service - storage-tank product temperature for a site
//!
//! Hourly weather and the latest ambient reading are cached per city so that
//! repeated lookups within the ttl do not hit the weather source again.

use std::time::Duration;

use loadplan_domain::repository::WeatherSource;
use loadplan_domain::service::{predict_fuel_temp_now, FuelTempPrediction, PredictorParams};
use loadplan_types::{Error, HourlyWeather, Result};
use serde::Serialize;
use tracing::debug;

use crate::cache::{city_key, Clock, SystemClock, TtlCache};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct TemperatureRequest {
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    /// Current ambient reading; falls back to the cache, then the newest sample
    pub ambient_now_f: Option<f64>,
    /// Unix seconds
    pub now_ts: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureOutcome {
    pub prediction: FuelTempPrediction,
    pub ambient_now_f: f64,
    pub samples: usize,
    pub weather_from_cache: bool,
}

pub struct TemperatureService<W, C: Clock = SystemClock> {
    source: W,
    params: PredictorParams,
    weather_cache: TtlCache<Vec<HourlyWeather>, C>,
    ambient_cache: TtlCache<f64, C>,
}

impl<W: WeatherSource> TemperatureService<W, SystemClock> {
    /// Service using the config's predictor params and cache ttls
    pub fn from_config(source: W, config: &Config) -> Self {
        Self::with_clock(
            source,
            config.predictor_params(),
            Duration::from_secs(config.weather_cache_ttl_minutes * 60),
            Duration::from_secs(config.ambient_cache_ttl_minutes * 60),
            SystemClock,
        )
    }
}

impl<W: WeatherSource, C: Clock + Clone> TemperatureService<W, C> {
    pub fn with_clock(
        source: W,
        params: PredictorParams,
        weather_ttl: Duration,
        ambient_ttl: Duration,
        clock: C,
    ) -> Self {
        Self {
            source,
            params,
            weather_cache: TtlCache::with_clock(weather_ttl, clock.clone()),
            ambient_cache: TtlCache::with_clock(ambient_ttl, clock),
        }
    }

    pub fn predict(&mut self, request: &TemperatureRequest) -> Result<TemperatureOutcome> {
        let key = city_key(&request.city, &request.state);

        let (hourlies, weather_from_cache) = match self.weather_cache.get(&key) {
            Some(cached) => (cached, true),
            None => {
                let fresh = self.source.hourly_weather(request.lat, request.lon)?;
                self.weather_cache.insert(key.clone(), fresh.clone());
                (fresh, false)
            }
        };

        let ambient_now_f = match request.ambient_now_f.filter(|t| t.is_finite()) {
            Some(t) => {
                self.ambient_cache.insert(key.clone(), t);
                Some(t)
            }
            None => self
                .ambient_cache
                .get(&key)
                .or_else(|| hourlies.last().map(|h| h.temp_f)),
        };

        debug!(
            key = %key,
            samples = hourlies.len(),
            weather_from_cache,
            ?ambient_now_f,
            "predicting product temperature"
        );

        let Some(ambient_now_f) = ambient_now_f else {
            return Err(Error::InvalidInput(
                "no ambient temperature and no weather samples".to_string(),
            ));
        };
        let prediction = predict_fuel_temp_now(
            &hourlies,
            request.lat,
            request.lon,
            ambient_now_f,
            request.now_ts,
            &self.params,
        );

        Ok(TemperatureOutcome {
            prediction,
            ambient_now_f,
            samples: hourlies.len(),
            weather_from_cache,
        })
    }
}
