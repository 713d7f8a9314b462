use std::iter::Sum;

/// Running sum using the Kahan-Babushka-Neumaier algorithm for reduced numerical error in summation
///
/// <https://en.wikipedia.org/wiki/Kahan_summation_algorithm#Further_enhancements>
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KbnSum {
    sum: f64,
    compensation: f64,
}

impl KbnSum {
    pub fn add(&mut self, input: f64) {
        let t = self.sum + input;
        self.compensation += if self.sum.abs() >= input.abs() {
            (self.sum - t) + input
        } else {
            (input - t) + self.sum
        };
        self.sum = t;
    }

    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl Sum<f64> for KbnSum {
    fn sum<I: Iterator<Item = f64>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, x| {
            acc.add(x);
            acc
        })
    }
}

#[cfg(test)]
#[test]
fn test_summation() {
    let input = [1.0, 1e100, 1.0, -1e100];
    let out = input.iter().copied().sum::<KbnSum>().total();

    assert_ne!(input.iter().sum::<f64>(), out);
    assert_eq!(out, 2.)
}
