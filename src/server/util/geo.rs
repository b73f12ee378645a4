//! Geodesic calculations on the WGS-84 ellipsoid.
//!
//! Distances use Vincenty's inverse formula and target projection uses Vincenty's direct
//! formula. Both iterate until the change in the auxiliary angle drops below
//! [`CONVERGENCE_THRESHOLD`]. Nearly antipodal pairs where the inverse iteration fails to
//! converge fall back to a great-circle distance on the mean Earth sphere.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// WGS-84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS-84 semi-minor axis in metres.
const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// Mean Earth radius in metres, used by the great-circle fallback.
const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

const CONVERGENCE_THRESHOLD: f64 = 1e-12;
const MAX_ITERATIONS: usize = 200;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the point is finite and inside latitude [-90, 90] and longitude [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Returns the distance in metres between two points.
///
/// Deterministic and symmetric within floating point tolerance. Coincident points return
/// exactly `0.0`.
///
/// # Arguments
/// - `a` - First point
/// - `b` - Second point
///
/// # Returns
/// Ellipsoidal distance in metres
pub fn distance(a: Point, b: Point) -> f64 {
    vincenty_inverse(a, b).unwrap_or_else(|| great_circle_distance(a, b))
}

/// Projects a destination point from `origin` along an initial bearing.
///
/// # Arguments
/// - `origin` - Starting point
/// - `bearing_degrees` - Initial bearing clockwise from true north
/// - `distance_m` - Distance to travel in metres
///
/// # Returns
/// The destination point with longitude normalised to [-180, 180]
pub fn project(origin: Point, bearing_degrees: f64, distance_m: f64) -> Point {
    let alpha1 = bearing_degrees.to_radians();
    let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

    let tan_u1 = (1.0 - WGS84_F) * origin.lat.to_radians().tan();
    let cos_u1 = 1.0 / (1.0 + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
    let (a_coef, b_coef) = series_coefficients(cos_sq_alpha);

    let sigma_base = distance_m / (WGS84_B * a_coef);
    let mut sigma = sigma_base;

    for _ in 0..MAX_ITERATIONS {
        let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        let delta_sigma = delta_sigma(b_coef, sigma.sin(), sigma.cos(), cos_2sigma_m);
        let previous = sigma;
        sigma = sigma_base + delta_sigma;

        if (sigma - previous).abs() < CONVERGENCE_THRESHOLD {
            break;
        }
    }

    let (sin_sigma, cos_sigma) = sigma.sin_cos();
    let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();

    let x = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
        .atan2((1.0 - WGS84_F) * (sin_alpha * sin_alpha + x * x).sqrt());
    let lambda =
        (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);

    let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
    let l = lambda
        - (1.0 - c)
            * WGS84_F
            * sin_alpha
            * (sigma
                + c * sin_sigma
                    * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

    Point {
        lat: lat2.to_degrees(),
        lng: normalize_longitude(origin.lng + l.to_degrees()),
    }
}

/// Vincenty inverse; `None` when the iteration does not converge.
fn vincenty_inverse(a: Point, b: Point) -> Option<f64> {
    let l = normalize_longitude(b.lng - a.lng).to_radians();
    let u1 = ((1.0 - WGS84_F) * a.lat.to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * b.lat.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;

    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();

        if sin_sigma == 0.0 {
            return Some(0.0);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Equatorial lines have cos²α = 0
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        // Diverging towards the antipode
        if lambda.abs() > PI {
            return None;
        }

        if (lambda - previous).abs() < CONVERGENCE_THRESHOLD {
            let (a_coef, b_coef) = series_coefficients(cos_sq_alpha);
            let delta = delta_sigma(b_coef, sin_sigma, cos_sigma, cos_2sigma_m);

            let s = WGS84_B * a_coef * (sigma - delta);

            return s.is_finite().then_some(s);
        }
    }

    None
}

/// Vincenty's `A` and `B` series coefficients for a given cos²α.
fn series_coefficients(cos_sq_alpha: f64) -> (f64, f64) {
    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    (a, b)
}

fn delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos_sq_2sigma_m = cos_2sigma_m * cos_2sigma_m;

    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_sq_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_sq_2sigma_m)))
}

fn great_circle_distance(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * MEAN_EARTH_RADIUS * h.sqrt().min(1.0).asin()
}

fn normalize_longitude(lng: f64) -> f64 {
    (lng + 540.0).rem_euclid(360.0) - 180.0
}
