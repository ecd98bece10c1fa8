use std::f64::consts::PI;

pub type Point = (f64, f64);

pub fn degrees_to_radians(degrees: f64) -> f64 {
  (PI * degrees) / 180.
}

/// Point `distance` away from `from` along `heading` degrees.
pub fn forward(from: Point, heading: f64, distance: f64) -> Point {
  let radians = degrees_to_radians(heading);
  (
    from.0 + radians.cos() * distance,
    from.1 + radians.sin() * distance,
  )
}

fn segment_count(count: f64) -> usize {
  if count.is_nan() || count <= 0. {
    0
  } else {
    count.ceil() as usize
  }
}

/// Archimedean spiral around `center`: `turns` revolutions whose radius grows
/// to `spacing * turns`, sampled 20 times per turn.
pub fn spiral(center: Point, turns: f64, spacing: f64) -> Vec<Point> {
  let segments = segment_count(turns * 20.);
  (1..=segments)
    .map(|i| {
      let t = i as f64 / segments as f64;
      let angle = t * turns * PI * 2.;
      let radius = t * spacing * turns;
      (
        center.0 + angle.cos() * radius,
        center.1 + angle.sin() * radius,
      )
    })
    .collect()
}

/// Turtle-style arc: short strides of `radius / n` while the heading sweeps
/// from `heading` to `heading + angle` in 5 degree increments.
pub fn arc(from: Point, heading: f64, radius: f64, angle: f64) -> Vec<Point> {
  let segments = segment_count(angle / 5.);
  if segments == 0 {
    return Vec::new();
  }
  let stride = radius / segments as f64;
  let mut point = from;
  (0..=segments)
    .map(|i| {
      let current = heading + (angle * i as f64) / segments as f64;
      point = forward(point, current, stride);
      point
    })
    .collect()
}

pub const ZIGZAG_STRIDE: f64 = 40.;

/// Alternating sideways strokes of `width`, each followed by a forward
/// stroke of [`ZIGZAG_STRIDE`].
pub fn zigzag(from: Point, heading: f64, segments: f64, width: f64) -> Vec<Point> {
  let segments = segment_count(segments);
  let mut points = Vec::with_capacity(segments * 2);
  let mut point = from;
  for i in 0..segments {
    let side = if i % 2 == 0 { 90. } else { -90. };
    point = forward(point, heading + side, width);
    points.push(point);
    point = forward(point, heading, ZIGZAG_STRIDE);
    points.push(point);
  }
  points
}

pub const WAVE_LENGTH: f64 = 200.;

/// Sine wave laid along `heading` over [`WAVE_LENGTH`] units, offset
/// sideways by up to `amplitude`. The starting point itself is not included.
pub fn wave(from: Point, heading: f64, amplitude: f64, frequency: f64) -> Vec<Point> {
  let segments = segment_count(frequency * 20.);
  (1..=segments)
    .map(|i| {
      let t = i as f64 / segments as f64;
      let offset = (t * frequency * PI * 2.).sin() * amplitude;
      let along = forward(from, heading, WAVE_LENGTH * t);
      forward(along, heading + 90., offset)
    })
    .collect()
}
