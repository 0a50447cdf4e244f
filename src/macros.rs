macro_rules! max {
    ($a:expr, $b:expr) => {
        if $a > $b { $a } else { $b }
    };
}

/// Implements a C-style for loop, for use in const fn.
macro_rules! cfor {
    ($init: stmt; $cond: expr; $step: expr; $body: block) => {
        {
            $init
            #[allow(while_true)]
            while $cond {
                $body;

                $step;
            }
        }
    }
}

/// Lets a fieldless enum index the array with one slot per variant.
macro_rules! impl_enum_index {
    ($t:ty, $n:literal) => {
        impl<T> std::ops::Index<$t> for [T; $n] {
            type Output = T;

            fn index(&self, index: $t) -> &T {
                &self[index as usize]
            }
        }

        impl<T> std::ops::IndexMut<$t> for [T; $n] {
            fn index_mut(&mut self, index: $t) -> &mut T {
                &mut self[index as usize]
            }
        }
    };
}
