/// Generates a display implementation for a bitflag struct that uses flag names.
///
/// Bits without a name are printed as a trailing hex value.
macro_rules! bitflags_display_impl {
    ($flag_struct:ty) => {
        impl ::core::fmt::Display for $flag_struct {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                if self.is_empty() {
                    return write!(f, "no flags set");
                }

                let mut name_iter = self.iter_names();
                let mut first = true;

                for (name, _) in &mut name_iter {
                    if !first {
                        f.write_str(" | ")?;
                    }
                    f.write_str(name)?;
                    first = false;
                }

                let unknown = name_iter.remaining().bits();
                if unknown != 0 {
                    if !first {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{unknown:#x}")?;
                }

                Ok(())
            }
        }
    };
}

pub(crate) use bitflags_display_impl;
