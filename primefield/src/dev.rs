/// Write a `criterion` benchmark group covering the arithmetic of a prime field.
///
/// Expands to a function `$name(&mut Criterion)` measuring the constant-time operations
/// alongside their variable-time counterparts, so the two can be compared in one report.
#[macro_export]
macro_rules! bench_field {
    { $name:ident, $desc:expr, $fe_a:expr, $fe_b:expr } => {
        fn $name(c: &mut ::criterion::Criterion) {
            use ::core::hint::black_box;

            let (x, y) = (black_box($fe_a), black_box($fe_b));
            let exp = x.to_canonical();

            let mut group = c.benchmark_group($desc);
            group.bench_function("add", |b| b.iter(|| x + y));
            group.bench_function("sub", |b| b.iter(|| x - y));
            group.bench_function("mul", |b| b.iter(|| x * y));
            group.bench_function("square", |b| b.iter(|| x.square()));
            group.bench_function("half", |b| b.iter(|| x.half()));
            group.bench_function("invert", |b| b.iter(|| x.invert()));
            group.bench_function("invert_vartime", |b| {
                b.iter(|| $crate::MontyFieldElement::invert_vartime($crate::bigint::Vartime::new(&x)))
            });
            group.bench_function("pow_vartime", |b| b.iter(|| y.pow_vartime(&exp)));
            group.bench_function("legendre", |b| b.iter(|| x.legendre()));
            group.bench_function("sqrt", |b| b.iter(|| $crate::ff::Field::sqrt(&x)));
            group.finish();
        }
    };
}

/// Implement all tests for a type which impls the `PrimeField` trait.
#[macro_export]
macro_rules! test_primefield {
    ($fe:tt, $uint:ident) => {
        $crate::test_primefield_constants!($fe, $uint);
        $crate::test_field_arithmetic!($fe);
        $crate::test_field_invert!($fe);
        $crate::test_field_sqrt!($fe);
    };
}

/// Check the `PrimeField` constants against their defining relations.
#[macro_export]
macro_rules! test_primefield_constants {
    ($fe:tt, $uint:ident) => {
        use $crate::ff::PrimeField as _;

        const MODULUS: $uint = $uint::from_be_hex($fe::MODULUS);
        const T: $uint = $crate::compute_t(&MODULUS);

        #[test]
        fn modulus_is_odd_and_sized() {
            assert!(bool::from(MODULUS.is_odd()));
            assert_eq!(MODULUS.bits_vartime(), $fe::NUM_BITS);
            assert_eq!($fe::CAPACITY, $fe::NUM_BITS - 1);
        }

        #[test]
        fn two_adicity() {
            // m - 1 == T * 2^S with T odd
            assert!(bool::from(T.is_odd()));
            assert_eq!(T.shl_vartime($fe::S), MODULUS.wrapping_sub(&$uint::ONE));
        }

        #[test]
        fn generator_is_a_non_residue() {
            assert_eq!($fe::MULTIPLICATIVE_GENERATOR.legendre(), -1);
            assert_eq!($fe::DELTA.pow_vartime(&T), $fe::ONE);
        }

        #[test]
        fn roots_of_unity() {
            assert_eq!($fe::ROOT_OF_UNITY.sqn_vartime($fe::S as usize), $fe::ONE);
            assert_eq!($fe::MULTIPLICATIVE_GENERATOR.pow_vartime(&T), $fe::ROOT_OF_UNITY);
            assert_eq!($fe::ROOT_OF_UNITY * $fe::ROOT_OF_UNITY_INV, $fe::ONE);
            if $fe::S > 0 {
                assert_ne!($fe::ROOT_OF_UNITY.sqn_vartime($fe::S as usize - 1), $fe::ONE);
            }
        }

        #[test]
        fn two_inv_constant() {
            assert_eq!($fe::from(2u64) * $fe::TWO_INV, $fe::ONE);
            assert_eq!($fe::ONE.half(), $fe::TWO_INV);
        }
    };
}

/// Small squares, identities, negation, halving and the canonical round trip.
#[macro_export]
macro_rules! test_field_arithmetic {
    ($fe:tt) => {
        #[test]
        fn identities() {
            let x = $fe::from(0xdead_beefu64);
            assert_eq!(x + $fe::ZERO, x);
            assert_eq!(x * $fe::ONE, x);
            assert_eq!(x * $fe::ZERO, $fe::ZERO);
            assert!(bool::from($fe::ONE.is_one()));
            assert!(bool::from($fe::ZERO.is_zero()));
        }

        #[test]
        fn square_small_values() {
            assert_eq!($fe::ZERO.square(), $fe::ZERO);
            assert_eq!($fe::ONE.square(), $fe::ONE);
            assert_eq!($fe::from(2u64).square(), $fe::from(4u64));
        }

        #[test]
        fn square_matches_mul() {
            let mut x = $fe::from(0x1234_5678_9abc_def0u64);
            for _ in 0..16 {
                assert_eq!(x.square(), x * x);
                assert_eq!(x.double(), x + x);
                x = x.square() + $fe::ONE;
            }
        }

        #[test]
        fn negation_and_halving() {
            let mut x = $fe::from(42u64);
            assert_eq!(-$fe::ZERO, $fe::ZERO);
            for _ in 0..16 {
                assert_eq!(x + (-x), $fe::ZERO);
                assert_eq!(x.half().double(), x);
                x = x.square() - $fe::ONE;
            }
        }

        #[test]
        fn canonical_and_bytes_round_trip() {
            let mut x = $fe::from(3u64);
            for _ in 0..16 {
                let canonical = x.to_canonical();
                assert_eq!($fe::from_uint(&canonical).unwrap(), x);
                assert_eq!($fe::from_bytes(&x.to_bytes()).unwrap(), x);
                x = x.square() + x;
            }
        }
    };
}

/// Constant-time, variable-time and batched inversion agree, and zero has no inverse.
#[macro_export]
macro_rules! test_field_invert {
    ($fe:tt) => {
        #[test]
        fn invert() {
            let one = $fe::ONE;
            assert_eq!(one.invert().unwrap(), one);

            let three = $fe::from(3u64);
            let inv_three = three.invert().unwrap();
            assert_eq!(three * inv_three, one);
            assert_eq!((-three).invert().unwrap(), -inv_three);

            assert!(bool::from($fe::ZERO.invert().is_none()));
            assert_eq!($fe::ZERO.invert_or_zero(), $fe::ZERO);
        }

        #[test]
        fn invert_vartime_agrees() {
            use $crate::bigint::Vartime;

            let mut x = $fe::from(7u64);
            for _ in 0..16 {
                assert_eq!($fe::invert_vartime(Vartime::new(&x)).unwrap(), x.invert().unwrap());
                x = x.square() + $fe::from(5u64);
            }
            assert!(bool::from($fe::invert_vartime(Vartime::new(&$fe::ZERO)).is_none()));
        }

        #[test]
        fn batch_invert_skips_zero() {
            let mut values = [$fe::from(2u64), $fe::ZERO, $fe::from(9u64), $fe::from(11u64)];
            let expected = values.map(|v| v.invert_or_zero());
            let mut scratch = [$fe::ZERO; 4];
            $crate::batch_invert(&mut values, &mut scratch);
            assert_eq!(values, expected);
        }
    };
}

/// Square roots of small squares, and the Legendre symbol that gates them.
#[macro_export]
macro_rules! test_field_sqrt {
    ($fe:tt) => {
        #[test]
        fn sqrt() {
            for n in 1u64..=8 {
                let fe = $fe::from(n * n);
                let root = $crate::ff::Field::sqrt(&fe).unwrap();
                assert_eq!(root.square(), fe);
                assert_eq!(fe.legendre(), 1);
            }
            assert_eq!($fe::ZERO.legendre(), 0);
        }

        #[test]
        fn sqrt_of_non_residue() {
            let g = $fe::MULTIPLICATIVE_GENERATOR;
            assert!(!bool::from(g.is_square()));
            assert!(bool::from($crate::ff::Field::sqrt(&g).is_none()));
        }
    };
}
