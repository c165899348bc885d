pub(crate) type Float = f64;
pub(crate) const DIMENSIONALITY: usize = 3;
pub(crate) type Vector = [Float; DIMENSIONALITY];
pub(crate) const PI: Float = std::f64::consts::PI;
pub(crate) const SQRT_2: Float = std::f64::consts::SQRT_2;

//Natural units of the model:
//Total mass of a single model is 1, the gravitational constant is 1
//and the Plummer scale length is the unit of distance.
pub(crate) const TOTAL_MASS: Float = 1.;

pub(crate) fn norm(vector: &Vector) -> Float {
    vector.iter().map(|x| x * x).sum::<Float>().sqrt()
}
