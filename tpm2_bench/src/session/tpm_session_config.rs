// Copyright 2025 Fondazione LINKS
 
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
 
//     http://www.apache.org/licenses/LICENSE-2.0
 
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use tss_esapi::Tcti;

/// Configuration of the TPM connection, expressed as a TCTI name and configuration string
pub type TpmSessionConfig = Tcti;

/// TCTI used when none is provided: the reference simulator on its default port
pub const DEFAULT_TCTI: &str = "mssim:host=127.0.0.1,port=2321";
